//! Ordering engine - owner of core state and the event channel
//!
//! One engine instance per process. All lifecycle operations (cart
//! edits, placement, payment, status advances, loyalty, reviews) are
//! methods on [`OrderingEngine`], implemented in the sibling modules.
//! Each mutation runs in a single storage write transaction; domain
//! events are broadcast only after the transaction commits.

use chrono_tz::Tz;
use shared::DomainEvent;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::storage::{CoreStorage, StorageResult};

/// Broadcast channel capacity for domain events
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// The ordering engine
///
/// Cheap to clone is not a goal; share it behind an `Arc`.
pub struct OrderingEngine {
    storage: CoreStorage,
    event_tx: broadcast::Sender<DomainEvent>,
    /// Business timezone for calendar-day decisions (review window)
    tz: Tz,
}

impl OrderingEngine {
    /// Build an engine over already-opened storage
    pub fn new(storage: CoreStorage, tz: Tz) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            event_tx,
            tz,
        }
    }

    /// Open storage at `path` and build an engine over it
    pub fn open(path: impl AsRef<std::path::Path>, tz: Tz) -> StorageResult<Self> {
        Ok(Self::new(CoreStorage::open(path)?, tz))
    }

    /// Subscribe to domain events
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.event_tx.subscribe()
    }

    pub fn storage(&self) -> &CoreStorage {
        &self.storage
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Broadcast an event after its transaction has committed
    ///
    /// A send error only means no receiver is currently subscribed;
    /// state has already been persisted, so this is not a failure.
    pub(crate) fn emit(&self, event: DomainEvent) {
        debug!(
            event_id = %event.event_id,
            kind = %event.payload,
            user_id = %event.user_id,
            "Domain event emitted"
        );
        if self.event_tx.send(event).is_err() {
            warn!("No subscribers for domain event; dropped");
        }
    }
}
