//! Loyalty ledger - points awards and redemptions
//!
//! Awards earn `floor(total / 100)` points and run inside the payment
//! transaction, keyed by order id so a retried confirmation can never
//! award twice. Redemption is an atomic check-and-decrement: the
//! balance read and write share one write transaction, which redb
//! serializes against every other writer.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use redb::WriteTransaction;
use shared::{
    DomainEvent, DomainEventPayload, Order, PointsTransaction, RedemptionStatus,
    RedemptionTransaction, util,
};
use tracing::{debug, info};

use super::error::{EngineError, EngineResult};
use super::manager::OrderingEngine;
use super::storage::StorageError;

/// Currency units of spend per point earned
const POINTS_EARN_DIVISOR: u32 = 100;

impl OrderingEngine {
    /// Award points for a paid order, at most once per order id
    ///
    /// Runs inside the payment transaction. A total below the divisor
    /// earns nothing and leaves no ledger row; the payment's paid flag
    /// (checked in the same transaction) already blocks retries.
    pub(crate) fn award_points_in_txn(
        &self,
        txn: &WriteTransaction,
        order: &Order,
        now: i64,
    ) -> EngineResult<u32> {
        if self.storage().has_points_txn_for_order(txn, &order.id)? {
            debug!(order_id = %order.id, "Points already awarded for order");
            return Ok(0);
        }

        let points = (order.total_price / Decimal::from(POINTS_EARN_DIVISOR))
            .floor()
            .to_u32()
            .unwrap_or(0);
        if points == 0 {
            debug!(order_id = %order.id, "Order total below earn threshold");
            return Ok(0);
        }

        self.storage().put_points_txn(
            txn,
            &PointsTransaction {
                id: util::new_id(),
                user_id: order.user_id.clone(),
                order_id: order.id.clone(),
                amount: order.total_price,
                points_earned: points,
                awarded_at: now,
            },
        )?;

        let balance = self.storage().get_points_in_txn(txn, &order.user_id)?;
        self.storage()
            .set_points(txn, &order.user_id, balance + u64::from(points))?;

        Ok(points)
    }

    /// Spend points against a reward option
    ///
    /// Check-and-decrement in one transaction: of two concurrent
    /// redemptions against an insufficient combined balance, exactly
    /// one succeeds. Returns the pending redemption and the remaining
    /// balance.
    pub fn redeem(
        &self,
        user_id: &str,
        reward_id: &str,
        now: i64,
    ) -> EngineResult<(RedemptionTransaction, u32)> {
        let txn = self.storage().begin_write()?;

        let reward = self
            .storage()
            .get_reward_txn(&txn, reward_id)?
            .ok_or_else(|| EngineError::RewardNotFound(reward_id.to_string()))?;

        let balance = self.storage().get_points_in_txn(&txn, user_id)?;
        let required = u64::from(reward.points_required);
        if balance < required {
            return Err(EngineError::InsufficientPoints {
                required: reward.points_required,
                available: u32::try_from(balance).unwrap_or(u32::MAX),
            });
        }

        let remaining = balance - required;
        self.storage().set_points(&txn, user_id, remaining)?;

        let redemption = RedemptionTransaction::new(user_id, reward_id, reward.points_required, now);
        self.storage().put_redemption(&txn, &redemption)?;
        txn.commit().map_err(StorageError::from)?;

        info!(
            redemption_id = %redemption.id,
            reward_id = %reward_id,
            points_redeemed = reward.points_required,
            remaining,
            "Points redeemed"
        );
        self.emit(DomainEvent::new(
            user_id,
            util::now_millis(),
            DomainEventPayload::PointsRedeemed {
                redemption_id: redemption.id.clone(),
                reward_id: reward_id.to_string(),
                points_redeemed: reward.points_required,
                remaining_points: u32::try_from(remaining).unwrap_or(u32::MAX),
            },
        ));

        Ok((redemption, u32::try_from(remaining).unwrap_or(u32::MAX)))
    }

    /// Mark a redemption delivered; repeating is a no-op
    pub fn mark_delivered(&self, redemption_id: &str) -> EngineResult<RedemptionTransaction> {
        let txn = self.storage().begin_write()?;

        let mut redemption = self
            .storage()
            .get_redemption_txn(&txn, redemption_id)?
            .ok_or_else(|| EngineError::RedemptionNotFound(redemption_id.to_string()))?;
        if redemption.is_delivered() {
            return Ok(redemption);
        }

        redemption.status = RedemptionStatus::Delivered;
        self.storage().put_redemption(&txn, &redemption)?;
        txn.commit().map_err(StorageError::from)?;

        info!(redemption_id = %redemption_id, "Redemption delivered");
        Ok(redemption)
    }

    /// Archive (delete) a delivered redemption
    pub fn delete_redemption(&self, redemption_id: &str) -> EngineResult<()> {
        let txn = self.storage().begin_write()?;

        let redemption = self
            .storage()
            .get_redemption_txn(&txn, redemption_id)?
            .ok_or_else(|| EngineError::RedemptionNotFound(redemption_id.to_string()))?;
        if !redemption.is_delivered() {
            return Err(EngineError::RedemptionNotDelivered(
                redemption_id.to_string(),
            ));
        }

        self.storage().remove_redemption(&txn, redemption_id)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(())
    }

    /// Current points balance, saturating at `u32::MAX`
    pub fn balance(&self, user_id: &str) -> EngineResult<u32> {
        let points = self.storage().get_points(user_id)?;
        Ok(u32::try_from(points).unwrap_or(u32::MAX))
    }

    /// Award history, newest first
    pub fn points_history(&self, user_id: &str) -> EngineResult<Vec<PointsTransaction>> {
        let mut txns = self.storage().list_points_txns_for_user(user_id)?;
        txns.sort_by_key(|t| std::cmp::Reverse(t.awarded_at));
        Ok(txns)
    }

    /// Redemption history, newest first
    pub fn list_redemptions(&self, user_id: &str) -> EngineResult<Vec<RedemptionTransaction>> {
        let mut redemptions = self.storage().list_redemptions_for_user(user_id)?;
        redemptions.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(redemptions)
    }
}
