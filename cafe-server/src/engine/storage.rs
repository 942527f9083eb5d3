//! redb-based storage layer for the ordering core
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `menu_items` | `item_id` | `MenuItem` | Catalog |
//! | `special_offers` | `item_id` | `SpecialOffer` | At most one offer per item |
//! | `dining_tables` | `table_id` | `DiningTable` | Physical tables |
//! | `reward_options` | `reward_id` | `RewardOption` | Redeemable rewards |
//! | `cart_lines` | `(user_id, line_id)` | `CartLine` | Per-user cart contents |
//! | `cart_totals` | `user_id` | `Decimal` | Cached cart total |
//! | `orders` | `order_id` | `Order` | Orders with frozen line snapshots |
//! | `loyalty_accounts` | `user_id` | `u64` | Points balance |
//! | `points_txns` | `order_id` | `PointsTransaction` | Award ledger (idempotency) |
//! | `redemptions` | `redemption_id` | `RedemptionTransaction` | Redemption ledger |
//! | `reviews` | `review_id` | `Review` | Order reviews |
//! | `review_order_index` | `order_id` | `review_id` | One review per order |
//! | `notifications` | `(user_id, notification_id)` | `Notification` | Inbox |
//!
//! # Consistency
//!
//! All multi-step mutations run inside a single `WriteTransaction`; redb
//! serializes writers, so a payment confirmation and its points award
//! commit together or not at all. Keying the award ledger by `order_id`
//! doubles as the idempotency check.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use rust_decimal::Decimal;
use shared::{
    CartLine, DiningTable, MenuItem, Notification, Order, PointsTransaction,
    RedemptionTransaction, Review, RewardOption, SpecialOffer,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Catalog items: key = item_id, value = JSON-serialized MenuItem
const MENU_ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("menu_items");

/// Offers: key = item_id, value = JSON-serialized SpecialOffer (at most one per item)
const SPECIAL_OFFERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("special_offers");

/// Dining tables: key = table_id, value = JSON-serialized DiningTable
const DINING_TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dining_tables");

/// Reward options: key = reward_id, value = JSON-serialized RewardOption
const REWARD_OPTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reward_options");

/// Cart lines: key = (user_id, line_id), value = JSON-serialized CartLine
const CART_LINES_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("cart_lines");

/// Cached cart totals: key = user_id, value = JSON-serialized Decimal
const CART_TOTALS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cart_totals");

/// Orders: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Loyalty balances: key = user_id, value = points
const LOYALTY_ACCOUNTS_TABLE: TableDefinition<&str, u64> =
    TableDefinition::new("loyalty_accounts");

/// Points award ledger: key = order_id, value = JSON-serialized PointsTransaction
const POINTS_TXNS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("points_txns");

/// Redemption ledger: key = redemption_id, value = JSON-serialized RedemptionTransaction
const REDEMPTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("redemptions");

/// Reviews: key = review_id, value = JSON-serialized Review
const REVIEWS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reviews");

/// One-review-per-order index: key = order_id, value = review_id
const REVIEW_ORDER_INDEX_TABLE: TableDefinition<&str, &str> =
    TableDefinition::new("review_order_index");

/// Notifications: key = (user_id, notification_id), value = JSON-serialized Notification
const NOTIFICATIONS_TABLE: TableDefinition<(&str, &str), &[u8]> =
    TableDefinition::new("notifications");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Ordering core storage backed by redb
///
/// redb uses `Durability::Immediate` by default: commits are persistent
/// as soon as `commit()` returns, and the file is always in a
/// consistent state across crashes.
#[derive(Clone)]
pub struct CoreStorage {
    db: Arc<Database>,
}

impl CoreStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Create all tables so later read transactions never see a missing table
    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(SPECIAL_OFFERS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;
            let _ = write_txn.open_table(REWARD_OPTIONS_TABLE)?;
            let _ = write_txn.open_table(CART_LINES_TABLE)?;
            let _ = write_txn.open_table(CART_TOTALS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(LOYALTY_ACCOUNTS_TABLE)?;
            let _ = write_txn.open_table(POINTS_TXNS_TABLE)?;
            let _ = write_txn.open_table(REDEMPTIONS_TABLE)?;
            let _ = write_txn.open_table(REVIEWS_TABLE)?;
            let _ = write_txn.open_table(REVIEW_ORDER_INDEX_TABLE)?;
            let _ = write_txn.open_table(NOTIFICATIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Menu Items ==========

    pub fn put_menu_item(&self, txn: &WriteTransaction, item: &MenuItem) -> StorageResult<()> {
        let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
        let value = serde_json::to_vec(item)?;
        table.insert(item.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_menu_item(&self, item_id: &str) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;
        match table.get(item_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_menu_item_txn(
        &self,
        txn: &WriteTransaction,
        item_id: &str,
    ) -> StorageResult<Option<MenuItem>> {
        let table = txn.open_table(MENU_ITEMS_TABLE)?;
        match table.get(item_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_menu_items(&self) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;
        let mut items = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    pub fn remove_menu_item(&self, txn: &WriteTransaction, item_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
        table.remove(item_id)?;
        Ok(())
    }

    // ========== Special Offers ==========

    pub fn put_offer(&self, txn: &WriteTransaction, offer: &SpecialOffer) -> StorageResult<()> {
        let mut table = txn.open_table(SPECIAL_OFFERS_TABLE)?;
        let value = serde_json::to_vec(offer)?;
        table.insert(offer.item_id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_offer(&self, item_id: &str) -> StorageResult<Option<SpecialOffer>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SPECIAL_OFFERS_TABLE)?;
        match table.get(item_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_offer_txn(
        &self,
        txn: &WriteTransaction,
        item_id: &str,
    ) -> StorageResult<Option<SpecialOffer>> {
        let table = txn.open_table(SPECIAL_OFFERS_TABLE)?;
        match table.get(item_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_offers(&self) -> StorageResult<Vec<SpecialOffer>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SPECIAL_OFFERS_TABLE)?;
        let mut offers = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            offers.push(serde_json::from_slice(value.value())?);
        }
        Ok(offers)
    }

    pub fn remove_offer(&self, txn: &WriteTransaction, item_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(SPECIAL_OFFERS_TABLE)?;
        table.remove(item_id)?;
        Ok(())
    }

    // ========== Dining Tables ==========

    pub fn put_table(&self, txn: &WriteTransaction, dining_table: &DiningTable) -> StorageResult<()> {
        let mut table = txn.open_table(DINING_TABLES_TABLE)?;
        let value = serde_json::to_vec(dining_table)?;
        table.insert(dining_table.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_table(&self, table_id: &str) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        table_id: &str,
    ) -> StorageResult<Option<DiningTable>> {
        let table = txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(table_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;
        let mut tables = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            tables.push(serde_json::from_slice(value.value())?);
        }
        Ok(tables)
    }

    pub fn remove_table(&self, txn: &WriteTransaction, table_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(DINING_TABLES_TABLE)?;
        table.remove(table_id)?;
        Ok(())
    }

    // ========== Reward Options ==========

    pub fn put_reward(&self, txn: &WriteTransaction, reward: &RewardOption) -> StorageResult<()> {
        let mut table = txn.open_table(REWARD_OPTIONS_TABLE)?;
        let value = serde_json::to_vec(reward)?;
        table.insert(reward.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_reward(&self, reward_id: &str) -> StorageResult<Option<RewardOption>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REWARD_OPTIONS_TABLE)?;
        match table.get(reward_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_reward_txn(
        &self,
        txn: &WriteTransaction,
        reward_id: &str,
    ) -> StorageResult<Option<RewardOption>> {
        let table = txn.open_table(REWARD_OPTIONS_TABLE)?;
        match table.get(reward_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_rewards(&self) -> StorageResult<Vec<RewardOption>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REWARD_OPTIONS_TABLE)?;
        let mut rewards = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            rewards.push(serde_json::from_slice(value.value())?);
        }
        Ok(rewards)
    }

    pub fn remove_reward(&self, txn: &WriteTransaction, reward_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(REWARD_OPTIONS_TABLE)?;
        table.remove(reward_id)?;
        Ok(())
    }

    // ========== Cart Lines ==========

    pub fn put_cart_line(&self, txn: &WriteTransaction, line: &CartLine) -> StorageResult<()> {
        let mut table = txn.open_table(CART_LINES_TABLE)?;
        let key = (line.user_id.as_str(), line.line_id.as_str());
        let value = serde_json::to_vec(line)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Get all cart lines for a user
    pub fn get_cart_lines(&self, user_id: &str) -> StorageResult<Vec<CartLine>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_LINES_TABLE)?;

        let mut lines = Vec::new();
        let range_start = (user_id, "");
        let range_end = (user_id, "\u{10FFFF}");
        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            lines.push(serde_json::from_slice(value.value())?);
        }
        Ok(lines)
    }

    /// Get all cart lines for a user (within transaction)
    pub fn get_cart_lines_txn(
        &self,
        txn: &WriteTransaction,
        user_id: &str,
    ) -> StorageResult<Vec<CartLine>> {
        let table = txn.open_table(CART_LINES_TABLE)?;

        let mut lines = Vec::new();
        let range_start = (user_id, "");
        let range_end = (user_id, "\u{10FFFF}");
        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            lines.push(serde_json::from_slice(value.value())?);
        }
        Ok(lines)
    }

    pub fn remove_cart_line(
        &self,
        txn: &WriteTransaction,
        user_id: &str,
        line_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(CART_LINES_TABLE)?;
        table.remove((user_id, line_id))?;
        Ok(())
    }

    /// Remove every cart line belonging to a user
    pub fn clear_cart_lines(&self, txn: &WriteTransaction, user_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(CART_LINES_TABLE)?;

        // Collect keys first, then remove (can't iterate and mutate simultaneously)
        let range_start = (user_id, "");
        let range_end = (user_id, "\u{10FFFF}");
        let mut keys_to_remove: Vec<(String, String)> = Vec::new();
        for result in table.range(range_start..=range_end)? {
            let (key, _value) = result?;
            let key_value = key.value();
            keys_to_remove.push((key_value.0.to_string(), key_value.1.to_string()));
        }

        for (uid, line_id) in &keys_to_remove {
            table.remove((uid.as_str(), line_id.as_str()))?;
        }
        Ok(())
    }

    // ========== Cart Totals (cache) ==========

    pub fn set_cached_total(
        &self,
        txn: &WriteTransaction,
        user_id: &str,
        total: Decimal,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(CART_TOTALS_TABLE)?;
        let value = serde_json::to_vec(&total)?;
        table.insert(user_id, value.as_slice())?;
        Ok(())
    }

    /// Cached cart total; `Decimal::ZERO` when no cart has been touched yet
    pub fn get_cached_total(&self, user_id: &str) -> StorageResult<Decimal> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CART_TOTALS_TABLE)?;
        match table.get(user_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(Decimal::ZERO),
        }
    }

    // ========== Orders ==========

    pub fn put_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        let value = serde_json::to_vec(order)?;
        table.insert(order.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_order(&self, order_id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<Order>> {
        let table = txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    pub fn remove_order(&self, txn: &WriteTransaction, order_id: &str) -> StorageResult<()> {
        let mut table = txn.open_table(ORDERS_TABLE)?;
        table.remove(order_id)?;
        Ok(())
    }

    // ========== Loyalty Accounts ==========

    /// Points balance; 0 for users without an account yet
    pub fn get_points(&self, user_id: &str) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOYALTY_ACCOUNTS_TABLE)?;
        Ok(table.get(user_id)?.map(|guard| guard.value()).unwrap_or(0))
    }

    /// Points balance (within transaction)
    pub fn get_points_in_txn(&self, txn: &WriteTransaction, user_id: &str) -> StorageResult<u64> {
        let table = txn.open_table(LOYALTY_ACCOUNTS_TABLE)?;
        Ok(table.get(user_id)?.map(|guard| guard.value()).unwrap_or(0))
    }

    pub fn set_points(
        &self,
        txn: &WriteTransaction,
        user_id: &str,
        points: u64,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(LOYALTY_ACCOUNTS_TABLE)?;
        table.insert(user_id, points)?;
        Ok(())
    }

    // ========== Points Transactions ==========

    /// Whether points were already awarded for this order (within transaction)
    pub fn has_points_txn_for_order(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<bool> {
        let table = txn.open_table(POINTS_TXNS_TABLE)?;
        Ok(table.get(order_id)?.is_some())
    }

    pub fn put_points_txn(
        &self,
        txn: &WriteTransaction,
        points_txn: &PointsTransaction,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(POINTS_TXNS_TABLE)?;
        let value = serde_json::to_vec(points_txn)?;
        table.insert(points_txn.order_id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn list_points_txns_for_user(&self, user_id: &str) -> StorageResult<Vec<PointsTransaction>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POINTS_TXNS_TABLE)?;
        let mut txns: Vec<PointsTransaction> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let points_txn: PointsTransaction = serde_json::from_slice(value.value())?;
            if points_txn.user_id == user_id {
                txns.push(points_txn);
            }
        }
        Ok(txns)
    }

    // ========== Redemptions ==========

    pub fn put_redemption(
        &self,
        txn: &WriteTransaction,
        redemption: &RedemptionTransaction,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(REDEMPTIONS_TABLE)?;
        let value = serde_json::to_vec(redemption)?;
        table.insert(redemption.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_redemption(&self, redemption_id: &str) -> StorageResult<Option<RedemptionTransaction>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REDEMPTIONS_TABLE)?;
        match table.get(redemption_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_redemption_txn(
        &self,
        txn: &WriteTransaction,
        redemption_id: &str,
    ) -> StorageResult<Option<RedemptionTransaction>> {
        let table = txn.open_table(REDEMPTIONS_TABLE)?;
        match table.get(redemption_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_redemptions_for_user(
        &self,
        user_id: &str,
    ) -> StorageResult<Vec<RedemptionTransaction>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REDEMPTIONS_TABLE)?;
        let mut redemptions: Vec<RedemptionTransaction> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let redemption: RedemptionTransaction = serde_json::from_slice(value.value())?;
            if redemption.user_id == user_id {
                redemptions.push(redemption);
            }
        }
        Ok(redemptions)
    }

    pub fn remove_redemption(
        &self,
        txn: &WriteTransaction,
        redemption_id: &str,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(REDEMPTIONS_TABLE)?;
        table.remove(redemption_id)?;
        Ok(())
    }

    // ========== Reviews ==========

    /// Store a review and index it by its order
    pub fn put_review(&self, txn: &WriteTransaction, review: &Review) -> StorageResult<()> {
        {
            let mut table = txn.open_table(REVIEWS_TABLE)?;
            let value = serde_json::to_vec(review)?;
            table.insert(review.id.as_str(), value.as_slice())?;
        }
        {
            let mut index = txn.open_table(REVIEW_ORDER_INDEX_TABLE)?;
            index.insert(review.order_id.as_str(), review.id.as_str())?;
        }
        Ok(())
    }

    pub fn get_review(&self, review_id: &str) -> StorageResult<Option<Review>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;
        match table.get(review_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_review_txn(
        &self,
        txn: &WriteTransaction,
        review_id: &str,
    ) -> StorageResult<Option<Review>> {
        let table = txn.open_table(REVIEWS_TABLE)?;
        match table.get(review_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// The review id attached to an order, if one exists (within transaction)
    pub fn review_id_for_order_txn(
        &self,
        txn: &WriteTransaction,
        order_id: &str,
    ) -> StorageResult<Option<String>> {
        let index = txn.open_table(REVIEW_ORDER_INDEX_TABLE)?;
        Ok(index.get(order_id)?.map(|guard| guard.value().to_string()))
    }

    pub fn list_reviews_for_user(&self, user_id: &str) -> StorageResult<Vec<Review>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;
        let mut reviews: Vec<Review> = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let review: Review = serde_json::from_slice(value.value())?;
            if review.user_id == user_id {
                reviews.push(review);
            }
        }
        Ok(reviews)
    }

    pub fn review_for_order(&self, order_id: &str) -> StorageResult<Option<Review>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(REVIEW_ORDER_INDEX_TABLE)?;
        let review_id = match index.get(order_id)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        let table = read_txn.open_table(REVIEWS_TABLE)?;
        match table.get(review_id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    // ========== Notifications ==========

    /// Store a notification in its own transaction (called from the
    /// delivery worker, outside any engine transaction)
    pub fn put_notification(&self, notification: &Notification) -> StorageResult<()> {
        let txn = self.begin_write()?;
        {
            let mut table = txn.open_table(NOTIFICATIONS_TABLE)?;
            let key = (notification.user_id.as_str(), notification.id.as_str());
            let value = serde_json::to_vec(notification)?;
            table.insert(key, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn list_notifications(&self, user_id: &str) -> StorageResult<Vec<Notification>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(NOTIFICATIONS_TABLE)?;

        let mut notifications = Vec::new();
        let range_start = (user_id, "");
        let range_end = (user_id, "\u{10FFFF}");
        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            notifications.push(serde_json::from_slice(value.value())?);
        }
        Ok(notifications)
    }

    /// Mark a notification read; returns false when it does not exist
    pub fn mark_notification_read(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> StorageResult<bool> {
        let txn = self.begin_write()?;
        let found = {
            let mut table = txn.open_table(NOTIFICATIONS_TABLE)?;
            let key = (user_id, notification_id);

            // Read and clone first to avoid borrow conflict
            let existing = if let Some(value) = table.get(key)? {
                let notification: Notification = serde_json::from_slice(value.value())?;
                Some(notification)
            } else {
                None
            };

            if let Some(mut notification) = existing {
                notification.is_read = true;
                let new_value = serde_json::to_vec(&notification)?;
                table.insert(key, new_value.as_slice())?;
                true
            } else {
                false
            }
        };
        txn.commit()?;
        Ok(found)
    }
}
