use serde::{Deserialize, Serialize};

/// Dining table record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    pub id: String,
    /// Human-facing table number, unique across the store
    pub table_number: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DiningTable {
    pub fn new(table_number: u32, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            table_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a dining table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: u32,
}
