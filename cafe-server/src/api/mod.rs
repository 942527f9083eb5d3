//! API route modules
//!
//! One module per resource, each exposing a `router()` merged by the
//! server:
//!
//! - [`health`] - liveness probe
//! - [`carts`] - cart lines and priced views
//! - [`orders`] - placement, payment, status, cancellation, reviews
//! - [`reviews`] - review edits
//! - [`rewards`] - rewards, redemptions, loyalty balance
//! - [`menu`] - menu items and special offers (admin write)
//! - [`tables`] - dining tables (admin write)
//! - [`notifications`] - persisted notification inbox

pub mod carts;
pub mod health;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod reviews;
pub mod rewards;
pub mod tables;
