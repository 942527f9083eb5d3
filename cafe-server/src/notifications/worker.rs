//! Background worker draining the engine's event channel
//!
//! Runs for the lifetime of the process; stops when the engine (the
//! channel sender) is dropped. A lagged receiver skips the missed
//! events and keeps going - notifications are best-effort, state has
//! already been committed by the engine.

use shared::{DomainEvent, DomainEventPayload, Notification, util};
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use super::NotificationSink;

pub struct NotificationWorker<S: NotificationSink> {
    events: broadcast::Receiver<DomainEvent>,
    sink: S,
}

impl<S: NotificationSink> NotificationWorker<S> {
    pub fn new(events: broadcast::Receiver<DomainEvent>, sink: S) -> Self {
        Self { events, sink }
    }

    pub async fn run(mut self) {
        loop {
            match self.events.recv().await {
                Ok(event) => self.handle(event).await,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "Notification worker lagged; skipping missed events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Event channel closed; notification worker stopping");
                    break;
                }
            }
        }
    }

    async fn handle(&self, event: DomainEvent) {
        let notification = Notification::new(
            event.user_id.clone(),
            message_for(&event.payload),
            util::now_millis(),
        );
        if let Err(e) = self.sink.deliver(&notification).await {
            error!(
                event_id = %event.event_id,
                kind = %event.payload,
                error = %e,
                "Failed to deliver notification"
            );
        }
    }
}

/// Compose the user-facing message for an event
fn message_for(payload: &DomainEventPayload) -> String {
    match payload {
        DomainEventPayload::PaymentConfirmed {
            order_id,
            total,
            table_number,
            points_awarded,
        } => {
            if *points_awarded > 0 {
                format!(
                    "Payment of {total} received for order {order_id}. Your food will be served at table {table_number}. You earned {points_awarded} loyalty points."
                )
            } else {
                format!(
                    "Payment of {total} received for order {order_id}. Your food will be served at table {table_number}."
                )
            }
        }
        DomainEventPayload::OrderCompleted { order_id } => {
            format!("Your order {order_id} is ready. Enjoy your meal! You can leave a review today.")
        }
        DomainEventPayload::PointsRedeemed {
            points_redeemed,
            remaining_points,
            ..
        } => {
            format!(
                "You redeemed {points_redeemed} loyalty points. Remaining balance: {remaining_points}."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CoreStorage;
    use crate::notifications::StoreSink;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn payment_event_lands_in_store() {
        let storage = CoreStorage::open_in_memory().unwrap();
        let (tx, rx) = broadcast::channel(8);
        let worker = NotificationWorker::new(rx, StoreSink::new(storage.clone()));

        tx.send(DomainEvent::new(
            "alice",
            1_000,
            DomainEventPayload::PaymentConfirmed {
                order_id: "order-1".to_string(),
                total: Decimal::from(250),
                table_number: 4,
                points_awarded: 2,
            },
        ))
        .unwrap();
        drop(tx); // close the channel so run() terminates

        worker.run().await;

        let notifications = storage.list_notifications("alice").unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("order-1"));
        assert!(notifications[0].message.contains("2 loyalty points"));
        assert!(!notifications[0].is_read);
    }

    #[test]
    fn messages_mention_the_essentials() {
        let msg = message_for(&DomainEventPayload::PointsRedeemed {
            redemption_id: "red-1".to_string(),
            reward_id: "rew-1".to_string(),
            points_redeemed: 40,
            remaining_points: 10,
        });
        assert!(msg.contains("40"));
        assert!(msg.contains("10"));

        let msg = message_for(&DomainEventPayload::OrderCompleted {
            order_id: "order-9".to_string(),
        });
        assert!(msg.contains("order-9"));
    }
}
