use serde::{Deserialize, Serialize};

/// Persisted user notification
///
/// The core decides *what* to notify (via domain events); delivery
/// beyond this record is an external concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: i64,
}

impl Notification {
    pub fn new(user_id: impl Into<String>, message: impl Into<String>, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            user_id: user_id.into(),
            message: message.into(),
            is_read: false,
            created_at: now,
        }
    }
}
