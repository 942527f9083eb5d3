//! Engine scenario tests
//!
//! In-memory storage, fixed timestamps, explicit business timezone.
//! - `test_core` - cart operations and pricing
//! - `test_flows` - end-to-end order / payment / loyalty / review flows
//! - `test_boundary` - edge cases and error taxonomy
//! - `test_concurrency` - races over the single-writer store

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::{
    DiningTable, MenuItem, MenuItemCreate, Order, RewardOption, RewardOptionCreate, SpecialOffer,
};

use super::*;

mod test_boundary;
mod test_concurrency;
mod test_flows;

const TZ: Tz = chrono_tz::Africa::Nairobi;

/// Fixed base instant: 2023-11-14T22:13:20Z (15 Nov, 01:13 in Nairobi)
const T0: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn create_test_engine() -> OrderingEngine {
    OrderingEngine::new(CoreStorage::open_in_memory().unwrap(), TZ)
}

fn seed_item(engine: &OrderingEngine, name: &str, price: u32) -> MenuItem {
    let item = MenuItem::new(
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_available: None,
        },
        T0,
    );
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().put_menu_item(&txn, &item).unwrap();
    txn.commit().unwrap();
    item
}

fn seed_unavailable_item(engine: &OrderingEngine, name: &str, price: u32) -> MenuItem {
    let mut item = seed_item(engine, name, price);
    item.is_available = false;
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().put_menu_item(&txn, &item).unwrap();
    txn.commit().unwrap();
    item
}

fn seed_offer(engine: &OrderingEngine, item_id: &str, pct: u32, starts_at: i64, ends_at: i64) {
    let offer = SpecialOffer {
        item_id: item_id.to_string(),
        discount_percentage: Decimal::from(pct),
        starts_at,
        ends_at,
    };
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().put_offer(&txn, &offer).unwrap();
    txn.commit().unwrap();
}

fn seed_table(engine: &OrderingEngine, table_number: u32) -> DiningTable {
    let table = DiningTable::new(table_number, T0);
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().put_table(&txn, &table).unwrap();
    txn.commit().unwrap();
    table
}

fn seed_reward(engine: &OrderingEngine, item_id: &str, points_required: u32) -> RewardOption {
    let reward = RewardOption::new(
        RewardOptionCreate {
            item_id: item_id.to_string(),
            points_required,
            description: None,
        },
        T0,
    );
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().put_reward(&txn, &reward).unwrap();
    txn.commit().unwrap();
    reward
}

fn give_points(engine: &OrderingEngine, user_id: &str, points: u64) {
    let txn = engine.storage().begin_write().unwrap();
    engine.storage().set_points(&txn, user_id, points).unwrap();
    txn.commit().unwrap();
}

/// Seed a single item at `price`, cart it, place the order
fn place_order_with_total(engine: &OrderingEngine, user_id: &str, price: u32) -> Order {
    let item = seed_item(engine, &format!("Dish {price}"), price);
    engine.add_cart_line(user_id, &item.id, 1, T0).unwrap();
    engine.place_order(user_id, T0).unwrap()
}

/// Cached total must always match a fresh recompute
fn assert_cart_consistent(engine: &OrderingEngine, user_id: &str, now: i64) {
    let derived = engine.view_cart(user_id, now).unwrap().total;
    let cached = engine.cached_cart_total(user_id).unwrap();
    assert_eq!(cached, derived, "cached cart total drifted from lines");
}
