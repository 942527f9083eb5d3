use serde::{Deserialize, Serialize};

/// Reward option - a menu item redeemable for loyalty points
///
/// Read-only collaborator data from the ledger's perspective: the
/// ledger only consults `points_required`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardOption {
    pub id: String,
    /// The redeemable menu item (at most one option per item)
    pub item_id: String,
    pub points_required: u32,
    #[serde(default)]
    pub description: String,
    pub created_at: i64,
}

impl RewardOption {
    pub fn new(payload: RewardOptionCreate, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            item_id: payload.item_id,
            points_required: payload.points_required,
            description: payload.description.unwrap_or_default(),
            created_at: now,
        }
    }
}

/// Payload for creating a reward option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardOptionCreate {
    pub item_id: String,
    pub points_required: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
