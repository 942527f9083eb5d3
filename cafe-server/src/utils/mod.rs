//! Utility module - shared helpers for the server crate
//!
//! - [`AppError`] / [`AppResult`] - HTTP-facing error type
//! - [`logger`] - tracing setup
//! - [`time`] - business-timezone day arithmetic
//! - [`validation`] - input limits and checks

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, AppResult, ok, ok_with_message};
