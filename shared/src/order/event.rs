//! Domain events - explicit values emitted by lifecycle operations
//!
//! Each engine operation that has side effects beyond its own rows
//! returns/broadcasts one of these after its transaction commits. The
//! loyalty award itself is NOT an event handler - it runs inside the
//! payment transaction; events only drive after-commit fan-out
//! (notifications, client refresh).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain event - immutable fact recorded after a lifecycle operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_id: String,
    /// Server timestamp (Unix millis)
    pub timestamp: i64,
    /// The user the event concerns (notification target)
    pub user_id: String,
    pub payload: DomainEventPayload,
}

impl DomainEvent {
    pub fn new(user_id: impl Into<String>, timestamp: i64, payload: DomainEventPayload) -> Self {
        Self {
            event_id: crate::util::new_id(),
            timestamp,
            user_id: user_id.into(),
            payload,
        }
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEventPayload {
    /// Payment confirmed: paid flag flipped, table attached, points
    /// awarded - all in the same transaction this event reports on
    PaymentConfirmed {
        order_id: String,
        total: Decimal,
        table_number: u32,
        /// Points awarded in the same transaction (0 if the total was
        /// below the earning threshold)
        points_awarded: u32,
    },
    /// Order reached COMPLETE (review reminder trigger)
    OrderCompleted { order_id: String },
    /// Points spent against a reward
    PointsRedeemed {
        redemption_id: String,
        reward_id: String,
        points_redeemed: u32,
        remaining_points: u32,
    },
}

impl DomainEventPayload {
    /// Stable event-type tag (logging / filtering)
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEventPayload::PaymentConfirmed { .. } => "PAYMENT_CONFIRMED",
            DomainEventPayload::OrderCompleted { .. } => "ORDER_COMPLETED",
            DomainEventPayload::PointsRedeemed { .. } => "POINTS_REDEEMED",
        }
    }
}

impl std::fmt::Display for DomainEventPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}
