use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time-bounded percentage discount attached to a menu item
///
/// The window is `[starts_at, ends_at)` in Unix millis. A window with
/// `ends_at <= starts_at` is malformed and never active; the pricing
/// policy treats it as absent rather than rejecting it at write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecialOffer {
    /// The menu item this offer belongs to (at most one offer per item)
    pub item_id: String,
    /// Percentage off the base price, 0-100
    pub discount_percentage: Decimal,
    pub starts_at: i64,
    pub ends_at: i64,
}

impl SpecialOffer {
    pub fn new(item_id: impl Into<String>, payload: SpecialOfferSet) -> Self {
        Self {
            item_id: item_id.into(),
            discount_percentage: payload.discount_percentage,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
        }
    }
}

/// Payload for setting (creating or replacing) an item's offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOfferSet {
    pub discount_percentage: Decimal,
    pub starts_at: i64,
    pub ends_at: i64,
}
