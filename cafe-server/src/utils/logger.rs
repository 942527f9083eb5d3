//! Logging infrastructure
//!
//! Structured logging setup for development (stdout) and production
//! (daily-rolling file via tracing-appender).

use std::path::Path;

/// Initialize the logger with stdout output
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` overrides `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.unwrap_or("info").to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "cafe-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
