//! Persisted records and API payloads for the cart/order/loyalty core

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Status
// ============================================================================

/// Order fulfillment status
///
/// Forward-only: a transition is legal iff the target ranks strictly
/// higher. Cancellation is modeled as deletion, not a status value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Ready,
    Complete,
    Delivered,
}

impl OrderStatus {
    /// Position in the forward ordering
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Ready => 1,
            OrderStatus::Complete => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// Whether moving to `next` is a legal forward transition
    ///
    /// Skips are allowed (e.g. Pending -> Complete); moving to a
    /// lower-or-equal rank is not.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Ready => write!(f, "READY"),
            OrderStatus::Complete => write!(f, "COMPLETE"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
        }
    }
}

/// Error for unknown status strings (query-param parsing)
#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct InvalidStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "READY" => Ok(OrderStatus::Ready),
            "COMPLETE" => Ok(OrderStatus::Complete),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

// ============================================================================
// Cart
// ============================================================================

/// A single cart line, unique per (user, item)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub line_id: String,
    pub user_id: String,
    pub item_id: String,
    pub quantity: u32,
    pub created_at: i64,
}

impl CartLine {
    pub fn new(user_id: impl Into<String>, item_id: impl Into<String>, quantity: u32, now: i64) -> Self {
        Self {
            line_id: crate::util::new_id(),
            user_id: user_id.into(),
            item_id: item_id.into(),
            quantity,
            created_at: now,
        }
    }
}

/// Cart line enriched with pricing for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub line_id: String,
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    /// Effective unit price at the time of the read
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Full cart view: lines plus the freshly recomputed total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
}

// ============================================================================
// Order
// ============================================================================

/// Line snapshot frozen into an order at placement time
///
/// Insulates the order from later catalog/offer changes: the recorded
/// `unit_price` is the effective price at the placement instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order record
///
/// Invariants: `is_paid` is monotonic (false -> true only) and `status`
/// only moves forward. `updated_at` records the last status/paid change
/// and doubles as the payment-date surrogate for the review window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// Frozen line snapshots copied from the cart at placement
    pub lines: Vec<OrderLine>,
    /// Total fixed at placement; never recomputed
    pub total_price: Decimal,
    pub is_paid: bool,
    /// Estimated preparation time in minutes
    pub estimated_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn new(user_id: impl Into<String>, lines: Vec<OrderLine>, total_price: Decimal, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            user_id: user_id.into(),
            lines,
            total_price,
            is_paid: false,
            estimated_time: 5,
            table_id: None,
            table_number: None,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// Loyalty
// ============================================================================

/// Append-only record of a points award
///
/// Keyed by `order_id` in storage - the natural idempotency key that
/// guarantees at most one award per paid order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointsTransaction {
    pub id: String,
    pub user_id: String,
    pub order_id: String,
    /// The order total the award was computed from
    pub amount: Decimal,
    pub points_earned: u32,
    pub awarded_at: i64,
}

/// Redemption delivery status; `Delivered` is terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedemptionStatus {
    #[default]
    Pending,
    Delivered,
}

/// Append-only record of a points spend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedemptionTransaction {
    pub id: String,
    pub user_id: String,
    pub reward_id: String,
    pub points_redeemed: u32,
    pub status: RedemptionStatus,
    pub created_at: i64,
}

impl RedemptionTransaction {
    pub fn new(user_id: impl Into<String>, reward_id: impl Into<String>, points: u32, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            user_id: user_id.into(),
            reward_id: reward_id.into(),
            points_redeemed: points,
            status: RedemptionStatus::Pending,
            created_at: now,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status == RedemptionStatus::Delivered
    }
}

// ============================================================================
// Review
// ============================================================================

/// Order review, at most one per order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub order_id: String,
    pub user_id: String,
    /// 1-5
    pub rating: u8,
    pub comment: String,
    pub created_at: i64,
    pub updated_at: i64,
}

// ============================================================================
// API payloads
// ============================================================================

fn default_quantity() -> u32 {
    1
}

/// Payload for adding a cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartLine {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Payload for replacing a line's quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartLine {
    pub quantity: u32,
}

/// Payload for confirming payment of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmPayment {
    pub table_id: String,
}

/// Payload for advancing an order's status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceStatus {
    pub status: OrderStatus,
    /// New estimated preparation time in minutes, when the kitchen
    /// revises it alongside the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

/// Payload for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub rating: u8,
    pub comment: String,
}

/// Payload for editing a review (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ordering_is_forward_only() {
        assert!(OrderStatus::Pending.can_advance_to(OrderStatus::Ready));
        assert!(OrderStatus::Pending.can_advance_to(OrderStatus::Complete));
        assert!(OrderStatus::Ready.can_advance_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Ready.can_advance_to(OrderStatus::Ready));
        assert!(!OrderStatus::Complete.can_advance_to(OrderStatus::Pending));
        assert!(!OrderStatus::Delivered.can_advance_to(OrderStatus::Complete));
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let line = OrderLine {
            item_id: "item-1".to_string(),
            name: "Burger".to_string(),
            quantity: 3,
            unit_price: Decimal::new(450, 2), // 4.50
        };
        assert_eq!(line.line_total(), Decimal::new(1350, 2));
    }

    #[test]
    fn add_cart_line_quantity_defaults_to_one() {
        let payload: AddCartLine = serde_json::from_str(r#"{"item_id":"item-1"}"#).unwrap();
        assert_eq!(payload.quantity, 1);
    }
}
