//! Review operations
//!
//! An order can be reviewed once, and only while its window is open:
//! the order is paid and "today" (in the business timezone) is still
//! the day the payment landed. Edits are bound by the same window.

use shared::{Order, Review, ReviewCreate, ReviewUpdate, util};
use tracing::info;

use super::error::{EngineError, EngineResult};
use super::manager::OrderingEngine;
use super::storage::StorageError;
use crate::utils::time::same_business_day;
use crate::utils::validation::MAX_TEXT_LEN;

impl OrderingEngine {
    /// Whether `order` may (still) be reviewed at `now`
    pub fn review_window_open(&self, order: &Order, now: i64) -> bool {
        order.is_paid && same_business_day(order.updated_at, now, self.tz())
    }

    /// Attach a review to one of the user's orders
    pub fn create_review(
        &self,
        user_id: &str,
        order_id: &str,
        payload: ReviewCreate,
        now: i64,
    ) -> EngineResult<Review> {
        validate_rating(payload.rating)?;
        validate_comment(&payload.comment)?;

        let txn = self.storage().begin_write()?;

        let order = self
            .storage()
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(order_id.to_string()))?;
        if order.user_id != user_id {
            return Err(EngineError::OrderNotFound(order_id.to_string()));
        }
        if !self.review_window_open(&order, now) {
            return Err(EngineError::ReviewWindowClosed(order_id.to_string()));
        }
        if self
            .storage()
            .review_id_for_order_txn(&txn, order_id)?
            .is_some()
        {
            return Err(EngineError::AlreadyReviewed(order_id.to_string()));
        }

        let review = Review {
            id: util::new_id(),
            order_id: order_id.to_string(),
            user_id: user_id.to_string(),
            rating: payload.rating,
            comment: payload.comment,
            created_at: now,
            updated_at: now,
        };
        self.storage().put_review(&txn, &review)?;
        txn.commit().map_err(StorageError::from)?;

        info!(review_id = %review.id, order_id = %order_id, rating = review.rating, "Review created");
        Ok(review)
    }

    /// Edit one of the user's reviews, while the window is still open
    pub fn update_review(
        &self,
        user_id: &str,
        review_id: &str,
        payload: ReviewUpdate,
        now: i64,
    ) -> EngineResult<Review> {
        if let Some(rating) = payload.rating {
            validate_rating(rating)?;
        }
        if let Some(comment) = &payload.comment {
            validate_comment(comment)?;
        }

        let txn = self.storage().begin_write()?;

        let mut review = self
            .storage()
            .get_review_txn(&txn, review_id)?
            .ok_or_else(|| EngineError::ReviewNotFound(review_id.to_string()))?;
        if review.user_id != user_id {
            return Err(EngineError::ReviewNotFound(review_id.to_string()));
        }

        let order = self
            .storage()
            .get_order_txn(&txn, &review.order_id)?
            .ok_or_else(|| EngineError::OrderNotFound(review.order_id.clone()))?;
        if !self.review_window_open(&order, now) {
            return Err(EngineError::ReviewWindowClosed(review.order_id.clone()));
        }

        if let Some(rating) = payload.rating {
            review.rating = rating;
        }
        if let Some(comment) = payload.comment {
            review.comment = comment;
        }
        review.updated_at = now;
        self.storage().put_review(&txn, &review)?;
        txn.commit().map_err(StorageError::from)?;

        Ok(review)
    }

    /// The user's reviews, newest first
    pub fn list_reviews(&self, user_id: &str) -> EngineResult<Vec<Review>> {
        let mut reviews = self.storage().list_reviews_for_user(user_id)?;
        reviews.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(reviews)
    }
}

fn validate_rating(rating: u8) -> EngineResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(EngineError::InvalidRating(rating));
    }
    Ok(())
}

fn validate_comment(comment: &str) -> EngineResult<()> {
    if comment.len() > MAX_TEXT_LEN {
        return Err(EngineError::Validation(format!(
            "Comment is too long ({} chars, max {MAX_TEXT_LEN})",
            comment.len()
        )));
    }
    Ok(())
}
