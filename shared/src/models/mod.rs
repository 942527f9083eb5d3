//! Catalog and account models
//!
//! These are the records the ordering core treats as collaborator data:
//! the menu (with its time-bounded special offers), dining tables,
//! reward options, persisted notifications and the per-request role.

mod dining_table;
mod menu_item;
mod notification;
mod reward;
mod role;
mod special_offer;

pub use dining_table::{DiningTable, DiningTableCreate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use notification::Notification;
pub use reward::{RewardOption, RewardOptionCreate};
pub use role::{InvalidRole, Role};
pub use special_offer::{SpecialOffer, SpecialOfferSet};
