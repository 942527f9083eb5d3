//! Cafe Server - restaurant ordering backend
//!
//! # Overview
//!
//! Carts, orders, payment confirmation, loyalty points, rewards,
//! reviews and notifications over an embedded redb store. All
//! lifecycle operations run through the transactional
//! [`OrderingEngine`]; the HTTP layer is a thin axum surface over it.
//!
//! # Module structure
//!
//! ```text
//! cafe-server/src/
//! ├── core/           # Config, ServerState, HTTP server
//! ├── engine/         # Transactional ordering engine + storage
//! ├── pricing/        # Effective-price policy (special offers)
//! ├── catalog/        # Menu / offers / tables / rewards admin
//! ├── notifications/  # Domain-event fan-out to the inbox
//! ├── api/            # Routers and handlers
//! ├── auth/           # Request identity extraction
//! └── utils/          # Errors, logging, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod engine;
pub mod notifications;
pub mod pricing;
pub mod utils;

pub use catalog::CatalogRepository;
pub use core::{Config, Server, ServerState};
pub use engine::{CoreStorage, EngineError, OrderingEngine};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, work dir, logging
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;

    if config.is_production() {
        let log_dir = format!("{}/logs", config.work_dir);
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(Some(&config.log_level), Some(&log_dir));
    } else {
        init_logger_with_file(Some(&config.log_level), None);
    }

    Ok(())
}
