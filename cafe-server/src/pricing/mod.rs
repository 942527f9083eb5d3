//! Pricing policy - effective prices under time-bounded offers
//!
//! Pure functions over catalog records and an explicit instant. The
//! effective price of an item is its base price unless a well-formed
//! offer window covers the instant, in which case the percentage
//! discount applies, rounded to 2 decimal places.
//!
//! Malformed offers (window with `ends_at <= starts_at`, percentage
//! outside 0-100) are treated as absent rather than rejected: pricing
//! is a read path and must never fail on bad catalog data.

use rust_decimal::Decimal;
use shared::{MenuItem, SpecialOffer};

/// Whether an offer applies at `now`
///
/// The window is half-open `[starts_at, ends_at)`.
pub fn offer_active(offer: &SpecialOffer, now: i64) -> bool {
    if offer.ends_at <= offer.starts_at {
        return false;
    }
    if offer.discount_percentage < Decimal::ZERO || offer.discount_percentage > Decimal::from(100) {
        return false;
    }
    now >= offer.starts_at && now < offer.ends_at
}

/// Effective unit price of an item at `now`
pub fn effective_price(item: &MenuItem, offer: Option<&SpecialOffer>, now: i64) -> Decimal {
    match offer {
        Some(offer) if offer_active(offer, now) => {
            let factor = (Decimal::from(100) - offer.discount_percentage) / Decimal::from(100);
            (item.price * factor).round_dp(2)
        }
        _ => item.price,
    }
}
