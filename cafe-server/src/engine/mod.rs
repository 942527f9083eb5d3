//! Transactional ordering engine
//!
//! The core of the server: carts, order lifecycle, loyalty ledger and
//! reviews over a single redb database. Every mutation is one write
//! transaction; domain events fan out on a broadcast channel after the
//! commit.
//!
//! - [`manager`] - [`OrderingEngine`], event channel
//! - [`storage`] - redb tables and typed accessors
//! - [`carts`] - cart line operations and priced views
//! - [`orders`] - placement, payment, status, cancellation
//! - [`loyalty`] - points awards and redemptions
//! - [`reviews`] - review window policy and CRUD
//! - [`error`] - [`EngineError`] taxonomy

pub mod carts;
pub mod error;
pub mod loyalty;
pub mod manager;
pub mod orders;
pub mod reviews;
pub mod storage;

#[cfg(test)]
mod tests;

pub use error::{EngineError, EngineResult};
pub use manager::OrderingEngine;
pub use storage::{CoreStorage, StorageError, StorageResult};
