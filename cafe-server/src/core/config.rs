use chrono_tz::Tz;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/cafe | Database and log files |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | TIMEZONE | Africa/Nairobi | Business timezone (review window) |
/// | LOG_LEVEL | info | Default tracing filter (`RUST_LOG` overrides) |
/// | ENVIRONMENT | development | development \| staging \| production |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Business timezone - calendar-day decisions happen here, not UTC
    pub timezone: Tz,
    /// Default log level
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/cafe".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| tz.parse().ok())
                .unwrap_or(chrono_tz::Africa::Nairobi),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the filesystem/network knobs; used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
