//! Shared domain types for the ordering backend
//!
//! This crate holds the types exchanged between the engine, the HTTP
//! layer and (eventually) client tooling:
//!
//! - **models**: catalog records (menu items, offers, tables, rewards),
//!   notifications and the request role enum
//! - **order**: cart/order/loyalty/review records and the domain events
//!   emitted by lifecycle operations
//! - **util**: small time helpers

pub mod models;
pub mod order;
pub mod util;

// Re-export the types nearly every consumer needs
pub use models::{
    DiningTable, DiningTableCreate, InvalidRole, MenuItem, MenuItemCreate, MenuItemUpdate,
    Notification, RewardOption, RewardOptionCreate, Role, SpecialOffer, SpecialOfferSet,
};
pub use order::{
    AddCartLine, AdvanceStatus, CartLine, CartLineView, CartView, ConfirmPayment, DomainEvent,
    DomainEventPayload, InvalidStatus, Order, OrderLine, OrderStatus, PointsTransaction,
    RedemptionStatus, RedemptionTransaction, Review, ReviewCreate, ReviewUpdate, UpdateCartLine,
};
