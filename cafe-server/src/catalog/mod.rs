//! Catalog administration - menu items, offers, tables, rewards
//!
//! Write-side access to the catalog tables the engine reads from.
//! Uniqueness rules live here: one offer per item, one reward option
//! per item, unique table numbers.

use rust_decimal::Decimal;
use shared::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemUpdate, RewardOption,
    RewardOptionCreate, SpecialOffer, SpecialOfferSet, util,
};
use tracing::info;

use crate::engine::{CoreStorage, EngineError, EngineResult, StorageError};

#[derive(Clone)]
pub struct CatalogRepository {
    storage: CoreStorage,
}

impl CatalogRepository {
    pub fn new(storage: CoreStorage) -> Self {
        Self { storage }
    }

    // ========== Menu items ==========

    pub fn create_menu_item(&self, payload: MenuItemCreate, now: i64) -> EngineResult<MenuItem> {
        if payload.price < Decimal::ZERO {
            return Err(EngineError::Validation(
                "Price must not be negative".to_string(),
            ));
        }

        let item = MenuItem::new(payload, now);
        let txn = self.storage.begin_write()?;
        self.storage.put_menu_item(&txn, &item)?;
        txn.commit().map_err(StorageError::from)?;

        info!(item_id = %item.id, name = %item.name, "Menu item created");
        Ok(item)
    }

    pub fn update_menu_item(
        &self,
        item_id: &str,
        payload: MenuItemUpdate,
        now: i64,
    ) -> EngineResult<MenuItem> {
        if let Some(price) = payload.price
            && price < Decimal::ZERO
        {
            return Err(EngineError::Validation(
                "Price must not be negative".to_string(),
            ));
        }

        let txn = self.storage.begin_write()?;
        let mut item = self
            .storage
            .get_menu_item_txn(&txn, item_id)?
            .ok_or_else(|| EngineError::ItemNotFound(item_id.to_string()))?;
        item.apply(payload, now);
        self.storage.put_menu_item(&txn, &item)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(item)
    }

    /// Delete an item, together with any offer attached to it
    pub fn delete_menu_item(&self, item_id: &str) -> EngineResult<()> {
        let txn = self.storage.begin_write()?;
        if self.storage.get_menu_item_txn(&txn, item_id)?.is_none() {
            return Err(EngineError::ItemNotFound(item_id.to_string()));
        }
        self.storage.remove_menu_item(&txn, item_id)?;
        self.storage.remove_offer(&txn, item_id)?;
        txn.commit().map_err(StorageError::from)?;

        info!(item_id = %item_id, "Menu item deleted");
        Ok(())
    }

    pub fn get_menu_item(&self, item_id: &str) -> EngineResult<MenuItem> {
        self.storage
            .get_menu_item(item_id)?
            .ok_or_else(|| EngineError::ItemNotFound(item_id.to_string()))
    }

    pub fn list_menu_items(&self) -> EngineResult<Vec<MenuItem>> {
        Ok(self.storage.list_menu_items()?)
    }

    // ========== Special offers ==========

    /// Set (create or replace) the item's offer
    pub fn set_offer(&self, item_id: &str, payload: SpecialOfferSet) -> EngineResult<SpecialOffer> {
        if payload.discount_percentage < Decimal::ZERO
            || payload.discount_percentage > Decimal::from(100)
        {
            return Err(EngineError::Validation(format!(
                "Discount percentage must be between 0 and 100, got {}",
                payload.discount_percentage
            )));
        }

        let txn = self.storage.begin_write()?;
        if self.storage.get_menu_item_txn(&txn, item_id)?.is_none() {
            return Err(EngineError::ItemNotFound(item_id.to_string()));
        }
        let offer = SpecialOffer::new(item_id, payload);
        self.storage.put_offer(&txn, &offer)?;
        txn.commit().map_err(StorageError::from)?;

        info!(item_id = %item_id, discount = %offer.discount_percentage, "Offer set");
        Ok(offer)
    }

    pub fn clear_offer(&self, item_id: &str) -> EngineResult<()> {
        let txn = self.storage.begin_write()?;
        if self.storage.get_menu_item_txn(&txn, item_id)?.is_none() {
            return Err(EngineError::ItemNotFound(item_id.to_string()));
        }
        self.storage.remove_offer(&txn, item_id)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(())
    }

    pub fn get_offer(&self, item_id: &str) -> EngineResult<Option<SpecialOffer>> {
        Ok(self.storage.get_offer(item_id)?)
    }

    pub fn list_offers(&self) -> EngineResult<Vec<SpecialOffer>> {
        Ok(self.storage.list_offers()?)
    }

    // ========== Dining tables ==========

    pub fn list_tables(&self) -> EngineResult<Vec<DiningTable>> {
        let mut tables = self.storage.list_tables()?;
        tables.sort_by_key(|t| t.table_number);
        Ok(tables)
    }

    pub fn create_table(&self, payload: DiningTableCreate, now: i64) -> EngineResult<DiningTable> {
        let txn = self.storage.begin_write()?;

        // Table numbers are unique; scan is fine at restaurant scale
        let existing = self.storage.list_tables()?;
        if existing
            .iter()
            .any(|t| t.table_number == payload.table_number)
        {
            return Err(EngineError::TableNumberTaken(payload.table_number));
        }

        let table = DiningTable::new(payload.table_number, now);
        self.storage.put_table(&txn, &table)?;
        txn.commit().map_err(StorageError::from)?;

        info!(table_id = %table.id, table_number = table.table_number, "Table created");
        Ok(table)
    }

    pub fn delete_table(&self, table_id: &str) -> EngineResult<()> {
        let txn = self.storage.begin_write()?;
        if self.storage.get_table_txn(&txn, table_id)?.is_none() {
            return Err(EngineError::TableNotFound(table_id.to_string()));
        }
        self.storage.remove_table(&txn, table_id)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(())
    }

    // ========== Reward options ==========

    pub fn list_rewards(&self) -> EngineResult<Vec<RewardOption>> {
        let mut rewards = self.storage.list_rewards()?;
        rewards.sort_by_key(|r| r.points_required);
        Ok(rewards)
    }

    pub fn create_reward(&self, payload: RewardOptionCreate, now: i64) -> EngineResult<RewardOption> {
        let txn = self.storage.begin_write()?;

        if self
            .storage
            .get_menu_item_txn(&txn, &payload.item_id)?
            .is_none()
        {
            return Err(EngineError::ItemNotFound(payload.item_id.clone()));
        }
        let existing = self.storage.list_rewards()?;
        if existing.iter().any(|r| r.item_id == payload.item_id) {
            return Err(EngineError::RewardExists(payload.item_id.clone()));
        }

        let reward = RewardOption::new(payload, now);
        self.storage.put_reward(&txn, &reward)?;
        txn.commit().map_err(StorageError::from)?;

        info!(reward_id = %reward.id, item_id = %reward.item_id, points_required = reward.points_required, "Reward option created");
        Ok(reward)
    }

    pub fn delete_reward(&self, reward_id: &str) -> EngineResult<()> {
        let txn = self.storage.begin_write()?;
        if self.storage.get_reward_txn(&txn, reward_id)?.is_none() {
            return Err(EngineError::RewardNotFound(reward_id.to_string()));
        }
        self.storage.remove_reward(&txn, reward_id)?;
        txn.commit().map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> CatalogRepository {
        CatalogRepository::new(CoreStorage::open_in_memory().unwrap())
    }

    fn item_payload(name: &str, price: u32) -> MenuItemCreate {
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            price: Decimal::from(price),
            is_available: None,
        }
    }

    #[test]
    fn item_crud_round_trip() {
        let repo = repo();
        let item = repo.create_menu_item(item_payload("Ugali", 150), 1_000).unwrap();
        assert!(item.is_available);

        let updated = repo
            .update_menu_item(
                &item.id,
                MenuItemUpdate {
                    price: Some(Decimal::from(200)),
                    ..Default::default()
                },
                2_000,
            )
            .unwrap();
        assert_eq!(updated.price, Decimal::from(200));
        assert_eq!(updated.updated_at, 2_000);

        repo.delete_menu_item(&item.id).unwrap();
        assert!(matches!(
            repo.get_menu_item(&item.id),
            Err(EngineError::ItemNotFound(_))
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let repo = repo();
        let result = repo.create_menu_item(
            MenuItemCreate {
                name: "Broken".to_string(),
                description: None,
                price: Decimal::from(-5),
                is_available: None,
            },
            1_000,
        );
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }

    #[test]
    fn deleting_item_clears_its_offer() {
        let repo = repo();
        let item = repo.create_menu_item(item_payload("Samosa", 100), 1_000).unwrap();
        repo.set_offer(
            &item.id,
            SpecialOfferSet {
                discount_percentage: Decimal::from(25),
                starts_at: 0,
                ends_at: 10_000,
            },
        )
        .unwrap();
        assert!(repo.get_offer(&item.id).unwrap().is_some());

        repo.delete_menu_item(&item.id).unwrap();
        assert!(repo.get_offer(&item.id).unwrap().is_none());
    }

    #[test]
    fn offer_percentage_bounds_enforced() {
        let repo = repo();
        let item = repo.create_menu_item(item_payload("Chai", 50), 1_000).unwrap();
        let result = repo.set_offer(
            &item.id,
            SpecialOfferSet {
                discount_percentage: Decimal::from(101),
                starts_at: 0,
                ends_at: 10_000,
            },
        );
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }

    #[test]
    fn duplicate_table_number_rejected() {
        let repo = repo();
        repo.create_table(DiningTableCreate { table_number: 7 }, 1_000)
            .unwrap();
        let result = repo.create_table(DiningTableCreate { table_number: 7 }, 2_000);
        assert!(matches!(result, Err(EngineError::TableNumberTaken(7))));
    }

    #[test]
    fn one_reward_option_per_item() {
        let repo = repo();
        let item = repo.create_menu_item(item_payload("Mandazi", 80), 1_000).unwrap();
        repo.create_reward(
            RewardOptionCreate {
                item_id: item.id.clone(),
                points_required: 20,
                description: None,
            },
            1_000,
        )
        .unwrap();

        let result = repo.create_reward(
            RewardOptionCreate {
                item_id: item.id.clone(),
                points_required: 30,
                description: None,
            },
            2_000,
        );
        assert!(matches!(result, Err(EngineError::RewardExists(_))));
    }

    #[test]
    fn reward_requires_existing_item() {
        let repo = repo();
        let result = repo.create_reward(
            RewardOptionCreate {
                item_id: "missing".to_string(),
                points_required: 20,
                description: None,
            },
            1_000,
        );
        assert!(matches!(result, Err(EngineError::ItemNotFound(_))));
    }
}
