//! Engine error types
//!
//! Domain-level failures from cart, order, loyalty, review and catalog
//! operations. The HTTP layer maps these onto status codes via
//! `From<EngineError> for AppError`.

use shared::OrderStatus;
use thiserror::Error;

use super::storage::StorageError;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    // ========== Validation ==========
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cart is empty")]
    EmptyCart,

    // ========== State conflicts ==========
    #[error("Item {0} is already in the cart")]
    DuplicateLine(String),

    #[error("Order {0} is already paid")]
    AlreadyPaid(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order {0} already has a review")]
    AlreadyReviewed(String),

    #[error("Review window closed for order {0}")]
    ReviewWindowClosed(String),

    #[error("Redemption {0} has not been delivered")]
    RedemptionNotDelivered(String),

    #[error("Item {0} is unavailable")]
    ItemUnavailable(String),

    #[error("Table number {0} already exists")]
    TableNumberTaken(u32),

    #[error("Reward option for item {0} already exists")]
    RewardExists(String),

    #[error("Insufficient points: {required} required, {available} available")]
    InsufficientPoints { required: u32, available: u32 },

    // ========== Not found ==========
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Dining table not found: {0}")]
    TableNotFound(String),

    #[error("Reward option not found: {0}")]
    RewardNotFound(String),

    #[error("Redemption not found: {0}")]
    RedemptionNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    // ========== System ==========
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
