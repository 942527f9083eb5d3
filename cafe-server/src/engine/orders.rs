//! Order lifecycle operations
//!
//! Placement freezes the cart into immutable line snapshots; payment
//! flips the monotonic paid flag, attaches the dining table and awards
//! loyalty points in the same transaction; status only moves forward.
//! Cancellation is deletion and is only possible before payment.

use rust_decimal::Decimal;
use shared::{DomainEvent, DomainEventPayload, Order, OrderLine, OrderStatus, util};
use tracing::info;

use super::error::{EngineError, EngineResult};
use super::manager::OrderingEngine;
use super::storage::StorageError;

impl OrderingEngine {
    /// Turn the user's cart into an order
    ///
    /// The cart lines are priced at `now`, snapshotted into the order
    /// and deleted - all in one transaction, so a concurrent line edit
    /// either lands before the snapshot or fails against an empty cart.
    pub fn place_order(&self, user_id: &str, now: i64) -> EngineResult<Order> {
        let txn = self.storage().begin_write()?;

        let (views, total) = self.priced_views_txn(&txn, user_id, now)?;
        if views.is_empty() {
            return Err(EngineError::EmptyCart);
        }

        let lines: Vec<OrderLine> = views
            .into_iter()
            .map(|view| OrderLine {
                item_id: view.item_id,
                name: view.name,
                quantity: view.quantity,
                unit_price: view.unit_price,
            })
            .collect();

        let order = Order::new(user_id, lines, total, now);
        self.storage().put_order(&txn, &order)?;
        self.storage().clear_cart_lines(&txn, user_id)?;
        self.storage().set_cached_total(&txn, user_id, Decimal::ZERO)?;
        txn.commit().map_err(StorageError::from)?;

        info!(order_id = %order.id, user_id = %user_id, total = %order.total_price, "Order placed");
        Ok(order)
    }

    /// Fetch one of the user's orders
    ///
    /// Another user's order id answers NotFound, not Forbidden - the
    /// existence of the order is not disclosed.
    pub fn get_order(&self, user_id: &str, order_id: &str) -> EngineResult<Order> {
        let order = self
            .storage()
            .get_order(order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(EngineError::OrderNotFound(order_id.to_string()));
        }
        Ok(order)
    }

    /// The user's orders, newest activity first, optionally filtered by status
    pub fn list_orders(
        &self,
        user_id: &str,
        status: Option<OrderStatus>,
    ) -> EngineResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .storage()
            .list_all_orders()?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .filter(|order| status.is_none_or(|s| order.status == s))
            .collect();
        orders.sort_by_key(|order| std::cmp::Reverse(order.updated_at));
        Ok(orders)
    }

    /// Every order in the store (kitchen view), newest activity first
    pub fn list_all_orders(&self, status: Option<OrderStatus>) -> EngineResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .storage()
            .list_all_orders()?
            .into_iter()
            .filter(|order| status.is_none_or(|s| order.status == s))
            .collect();
        orders.sort_by_key(|order| std::cmp::Reverse(order.updated_at));
        Ok(orders)
    }

    /// Confirm payment of an order and seat it at a table
    ///
    /// Flips the paid flag, attaches the table and awards loyalty
    /// points in one transaction; retrying after the commit answers
    /// AlreadyPaid and never awards twice. Returns the updated order
    /// and the points awarded.
    pub fn confirm_payment(
        &self,
        user_id: &str,
        order_id: &str,
        table_id: &str,
        now: i64,
    ) -> EngineResult<(Order, u32)> {
        let txn = self.storage().begin_write()?;

        let mut order = self
            .storage()
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(EngineError::OrderNotFound(order_id.to_string()));
        }
        if order.is_paid {
            return Err(EngineError::AlreadyPaid(order_id.to_string()));
        }

        let table = self
            .storage()
            .get_table_txn(&txn, table_id)?
            .ok_or_else(|| EngineError::TableNotFound(table_id.to_string()))?;

        order.is_paid = true;
        order.table_id = Some(table.id.clone());
        order.table_number = Some(table.table_number);
        order.updated_at = now;

        let points_awarded = self.award_points_in_txn(&txn, &order, now)?;
        self.storage().put_order(&txn, &order)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            order_id = %order.id,
            table_number = table.table_number,
            points_awarded,
            "Payment confirmed"
        );
        self.emit(DomainEvent::new(
            user_id,
            util::now_millis(),
            DomainEventPayload::PaymentConfirmed {
                order_id: order.id.clone(),
                total: order.total_price,
                table_number: table.table_number,
                points_awarded,
            },
        ));

        Ok((order, points_awarded))
    }

    /// Advance an order's fulfillment status (kitchen side)
    ///
    /// Transitions are forward-only; skips are allowed. Reaching
    /// Complete emits an `OrderCompleted` event.
    pub fn advance_status(
        &self,
        order_id: &str,
        next: OrderStatus,
        estimated_time: Option<u32>,
        now: i64,
    ) -> EngineResult<Order> {
        let txn = self.storage().begin_write()?;

        let mut order = self
            .storage()
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        if !order.status.can_advance_to(next) {
            return Err(EngineError::InvalidTransition {
                from: order.status,
                to: next,
            });
        }

        order.status = next;
        if let Some(minutes) = estimated_time {
            order.estimated_time = minutes;
        }
        order.updated_at = now;
        self.storage().put_order(&txn, &order)?;
        txn.commit().map_err(StorageError::from)?;

        info!(order_id = %order.id, status = %order.status, "Order status advanced");
        if next == OrderStatus::Complete {
            self.emit(DomainEvent::new(
                order.user_id.clone(),
                util::now_millis(),
                DomainEventPayload::OrderCompleted {
                    order_id: order.id.clone(),
                },
            ));
        }

        Ok(order)
    }

    /// Cancel (delete) an unpaid order
    pub fn cancel_order(&self, user_id: &str, order_id: &str) -> EngineResult<()> {
        let txn = self.storage().begin_write()?;

        let order = self
            .storage()
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(EngineError::OrderNotFound(order_id.to_string()));
        }
        if order.is_paid {
            return Err(EngineError::AlreadyPaid(order_id.to_string()));
        }

        self.storage().remove_order(&txn, order_id)?;
        txn.commit().map_err(StorageError::from)?;

        info!(order_id = %order_id, user_id = %user_id, "Order cancelled");
        Ok(())
    }
}
