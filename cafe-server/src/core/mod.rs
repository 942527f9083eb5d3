//! Core module - configuration, state and the HTTP server
//!
//! - [`Config`] - env-driven configuration
//! - [`ServerState`] - shared engine/storage/catalog handles
//! - [`Server`] - axum HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
