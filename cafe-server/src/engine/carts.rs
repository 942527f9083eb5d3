//! Cart operations
//!
//! One implicit cart per user, one line per (user, item). Every
//! mutation recomputes the priced view inside its own transaction and
//! rewrites the cached total, so the cache can never drift from the
//! lines it summarizes. Reads recompute from scratch - offers may have
//! started or ended since the last write.

use redb::WriteTransaction;
use rust_decimal::Decimal;
use shared::{CartLine, CartLineView, CartView};

use super::error::{EngineError, EngineResult};
use super::manager::OrderingEngine;
use crate::pricing;

impl OrderingEngine {
    /// Add a line to the user's cart
    ///
    /// Rejects unknown and unavailable items, and a second line for an
    /// item already in the cart (the existing line should be updated
    /// instead).
    pub fn add_cart_line(
        &self,
        user_id: &str,
        item_id: &str,
        quantity: u32,
        now: i64,
    ) -> EngineResult<CartLineView> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }

        let txn = self.storage().begin_write()?;

        let item = self
            .storage()
            .get_menu_item_txn(&txn, item_id)?
            .ok_or_else(|| EngineError::ItemNotFound(item_id.to_string()))?;
        if !item.is_available {
            return Err(EngineError::ItemUnavailable(item_id.to_string()));
        }

        let existing = self.storage().get_cart_lines_txn(&txn, user_id)?;
        if existing.iter().any(|line| line.item_id == item_id) {
            return Err(EngineError::DuplicateLine(item_id.to_string()));
        }

        let line = CartLine::new(user_id, item_id, quantity, now);
        self.storage().put_cart_line(&txn, &line)?;

        let (views, total) = self.priced_views_txn(&txn, user_id, now)?;
        self.storage().set_cached_total(&txn, user_id, total)?;
        txn.commit().map_err(super::storage::StorageError::from)?;

        views
            .into_iter()
            .find(|view| view.line_id == line.line_id)
            .ok_or_else(|| EngineError::LineNotFound(line.line_id.clone()))
    }

    /// Replace a line's quantity
    pub fn update_cart_line(
        &self,
        user_id: &str,
        line_id: &str,
        quantity: u32,
        now: i64,
    ) -> EngineResult<CartLineView> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity(quantity));
        }

        let txn = self.storage().begin_write()?;

        let lines = self.storage().get_cart_lines_txn(&txn, user_id)?;
        let mut line = lines
            .into_iter()
            .find(|line| line.line_id == line_id)
            .ok_or_else(|| EngineError::LineNotFound(line_id.to_string()))?;
        line.quantity = quantity;
        self.storage().put_cart_line(&txn, &line)?;

        let (views, total) = self.priced_views_txn(&txn, user_id, now)?;
        self.storage().set_cached_total(&txn, user_id, total)?;
        txn.commit().map_err(super::storage::StorageError::from)?;

        views
            .into_iter()
            .find(|view| view.line_id == line_id)
            .ok_or_else(|| EngineError::LineNotFound(line_id.to_string()))
    }

    /// Remove a line from the user's cart
    pub fn remove_cart_line(&self, user_id: &str, line_id: &str, now: i64) -> EngineResult<()> {
        let txn = self.storage().begin_write()?;

        let lines = self.storage().get_cart_lines_txn(&txn, user_id)?;
        if !lines.iter().any(|line| line.line_id == line_id) {
            return Err(EngineError::LineNotFound(line_id.to_string()));
        }
        self.storage().remove_cart_line(&txn, user_id, line_id)?;

        let (_views, total) = self.priced_views_txn(&txn, user_id, now)?;
        self.storage().set_cached_total(&txn, user_id, total)?;
        txn.commit().map_err(super::storage::StorageError::from)?;
        Ok(())
    }

    /// The user's cart, priced at `now`
    ///
    /// Always recomputed - never served from the cached total.
    pub fn view_cart(&self, user_id: &str, now: i64) -> EngineResult<CartView> {
        let lines = self.storage().get_cart_lines(user_id)?;
        let mut views = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;
        for line in &lines {
            // Lines whose item has left the catalog no longer price
            let Some(item) = self.storage().get_menu_item(&line.item_id)? else {
                continue;
            };
            let offer = self.storage().get_offer(&line.item_id)?;
            let view = price_line(line, &item, offer.as_ref(), now);
            total += view.line_total;
            views.push(view);
        }
        Ok(CartView {
            lines: views,
            total,
        })
    }

    /// The cached cart total, as written by the last cart mutation
    pub fn cached_cart_total(&self, user_id: &str) -> EngineResult<Decimal> {
        Ok(self.storage().get_cached_total(user_id)?)
    }

    /// Price every line of the user's cart within a write transaction
    pub(crate) fn priced_views_txn(
        &self,
        txn: &WriteTransaction,
        user_id: &str,
        now: i64,
    ) -> EngineResult<(Vec<CartLineView>, Decimal)> {
        let lines = self.storage().get_cart_lines_txn(txn, user_id)?;
        let mut views = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;
        for line in &lines {
            let Some(item) = self.storage().get_menu_item_txn(txn, &line.item_id)? else {
                continue;
            };
            let offer = self.storage().get_offer_txn(txn, &line.item_id)?;
            let view = price_line(line, &item, offer.as_ref(), now);
            total += view.line_total;
            views.push(view);
        }
        Ok((views, total))
    }
}

fn price_line(
    line: &CartLine,
    item: &shared::MenuItem,
    offer: Option<&shared::SpecialOffer>,
    now: i64,
) -> CartLineView {
    let unit_price = pricing::effective_price(item, offer, now);
    CartLineView {
        line_id: line.line_id.clone(),
        item_id: line.item_id.clone(),
        name: item.name.clone(),
        quantity: line.quantity,
        unit_price,
        line_total: unit_price * Decimal::from(line.quantity),
    }
}
