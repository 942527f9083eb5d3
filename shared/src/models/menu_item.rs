use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item (catalog record)
///
/// The ordering core only reads `price` and `is_available`; everything
/// else is display data managed by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base price before any offer is applied
    pub price: Decimal,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    pub fn new(payload: MenuItemCreate, now: i64) -> Self {
        Self {
            id: crate::util::new_id(),
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            price: payload.price,
            is_available: payload.is_available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update, bumping `updated_at`
    pub fn apply(&mut self, update: MenuItemUpdate, now: i64) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        self.updated_at = now;
    }
}

/// Payload for creating a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// Payload for updating a menu item (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
