//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - error enum, maps to HTTP status + stable code
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E3xxx  | Authentication | E3001 missing identity |
//! | E2xxx  | Authorization | E2001 role not allowed |
//! | E0xxx  | Business / validation | E0002 invalid input |
//! | E9xxx  | System | E9002 storage error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::engine::EngineError;

/// Application-level Result type, used by HTTP handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified API response envelope (used for errors and message-only
/// successes; data responses are plain `Json<T>`)
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication / authorization (4xx) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System (5xx) ==========
    #[error("Storage error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }
            AppError::Database(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Storage error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Map engine errors onto the HTTP taxonomy
///
/// Validation errors -> 400, state conflicts -> 409/422, missing
/// resources -> 404, exhaustion -> 422 with the shortfall spelled out,
/// storage failures -> 500.
impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        match e {
            // Validation - rejected before any mutation
            EngineError::InvalidQuantity(q) => {
                AppError::Validation(format!("Quantity must be at least 1, got {q}"))
            }
            EngineError::InvalidRating(r) => {
                AppError::Validation(format!("Rating must be between 1 and 5, got {r}"))
            }
            EngineError::Validation(msg) => AppError::Validation(msg),
            EngineError::EmptyCart => {
                AppError::Validation("The cart is empty, no items to place in the order".to_string())
            }

            // State conflicts - semantically rejected, not retried
            EngineError::DuplicateLine(item_id) => AppError::Conflict(format!(
                "Item {item_id} is already in the cart; update the line instead"
            )),
            EngineError::AlreadyPaid(order_id) => {
                AppError::Conflict(format!("Order {order_id} is already paid"))
            }
            EngineError::InvalidTransition { from, to } => AppError::Conflict(format!(
                "Cannot move order status from {from} to {to}"
            )),
            EngineError::AlreadyReviewed(order_id) => {
                AppError::Conflict(format!("Order {order_id} already has a review"))
            }
            EngineError::ReviewWindowClosed(order_id) => AppError::BusinessRule(format!(
                "The review window for order {order_id} has closed"
            )),
            EngineError::RedemptionNotDelivered(id) => AppError::BusinessRule(format!(
                "Redemption {id} must be delivered before it can be archived"
            )),
            EngineError::ItemUnavailable(item_id) => {
                AppError::BusinessRule(format!("Item {item_id} is currently unavailable"))
            }
            EngineError::TableNumberTaken(n) => {
                AppError::Conflict(format!("Table number {n} already exists"))
            }
            EngineError::RewardExists(item_id) => AppError::Conflict(format!(
                "A reward option for item {item_id} already exists"
            )),

            // Resource exhaustion - surfaced with the shortfall
            EngineError::InsufficientPoints {
                required,
                available,
            } => AppError::BusinessRule(format!(
                "Insufficient points: {required} required, {available} available"
            )),

            // Not found
            EngineError::ItemNotFound(id) => AppError::NotFound(format!("Menu item {id} not found")),
            EngineError::LineNotFound(id) => AppError::NotFound(format!("Cart line {id} not found")),
            EngineError::OrderNotFound(id) => AppError::NotFound(format!("Order {id} not found")),
            EngineError::TableNotFound(id) => {
                AppError::NotFound(format!("Dining table {id} not found"))
            }
            EngineError::RewardNotFound(id) => {
                AppError::NotFound(format!("Reward option {id} not found"))
            }
            EngineError::RedemptionNotFound(id) => {
                AppError::NotFound(format!("Redemption {id} not found"))
            }
            EngineError::ReviewNotFound(id) => {
                AppError::NotFound(format!("Review {id} not found"))
            }

            // System
            EngineError::Storage(e) => AppError::Database(e.to_string()),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response envelope with a custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
