//! Notification fan-out
//!
//! Consumes the engine's domain events after commit and turns them
//! into persisted per-user notifications. The transport is a trait so
//! tests (and future push channels) can substitute the store-backed
//! sink.

mod worker;

pub use worker::NotificationWorker;

use async_trait::async_trait;
use shared::Notification;

use crate::engine::CoreStorage;

/// Delivery target for composed notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Sink that persists notifications into the core store
pub struct StoreSink {
    storage: CoreStorage,
}

impl StoreSink {
    pub fn new(storage: CoreStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl NotificationSink for StoreSink {
    async fn deliver(&self, notification: &Notification) -> anyhow::Result<()> {
        self.storage.put_notification(notification)?;
        Ok(())
    }
}
