//! Cart, order, loyalty and review types
//!
//! - **types**: the persisted records and API payloads
//! - **event**: domain events emitted by lifecycle operations

pub mod event;
pub mod types;

pub use event::{DomainEvent, DomainEventPayload};
pub use types::{
    AddCartLine, AdvanceStatus, CartLine, CartLineView, CartView, ConfirmPayment, InvalidStatus,
    Order, OrderLine, OrderStatus, PointsTransaction, RedemptionStatus, RedemptionTransaction,
    Review, ReviewCreate, ReviewUpdate, UpdateCartLine,
};
