//! # Item Store
//!
//! The single authoritative list of food items.
//!
//! The full list is written back to key-value storage after every mutation
//! (a whole-collection overwrite, not a diff). Durability is best effort:
//! read, decode, encode and write failures are logged and absorbed, never
//! raised to the caller.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::items::{
    AddItemResult, DeleteItemResult, PersistenceError, SaveOutcome,
};
use crate::domain::models::{FoodItem, ItemId};
use crate::domain::reminder_scheduler::ReminderScheduler;
use crate::storage::KeyValueStorage;

/// Ordered, auto-persisted collection of food items
pub struct ItemStore {
    items: Vec<FoodItem>,
    storage: Arc<dyn KeyValueStorage>,
    scheduler: ReminderScheduler,
    storage_key: String,
}

impl ItemStore {
    /// Restore the store from `storage`. Missing or undecodable data yields an
    /// empty store.
    pub fn load(
        storage: Arc<dyn KeyValueStorage>,
        scheduler: ReminderScheduler,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let items = Self::read_items(storage.as_ref(), &storage_key);
        info!("Loaded {} food items", items.len());

        Self {
            items,
            storage,
            scheduler,
            storage_key,
        }
    }

    fn read_items(storage: &dyn KeyValueStorage, key: &str) -> Vec<FoodItem> {
        let bytes = match storage.get_value(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No saved items under '{}', starting empty", key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read saved items: {:#}. Starting empty.", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<FoodItem>>(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!("Saved items under '{}' could not be decoded: {}. Starting empty.", key, e);
                Vec::new()
            }
        }
    }

    /// Append `item`, persist, and schedule its reminder.
    ///
    /// The caller supplies a fresh id; uniqueness is not re-checked.
    pub fn add(&mut self, item: FoodItem) -> AddItemResult {
        info!("Adding item: {} ({}), expires {}", item.name, item.category, item.expiry_date);

        self.items.push(item);
        let persistence = self.save();

        let added = &self.items[self.items.len() - 1];
        let reminder = self.scheduler.schedule(added);

        AddItemResult {
            item_id: added.id,
            persistence,
            reminder,
        }
    }

    /// Remove the item with `id`, keeping the order of the rest.
    ///
    /// Unknown ids are a no-op. Pending reminders for the item are left alone.
    pub fn delete(&mut self, id: &ItemId) -> DeleteItemResult {
        let Some(position) = self.items.iter().position(|item| &item.id == id) else {
            debug!("Delete requested for unknown item {}", id);
            return DeleteItemResult {
                removed: None,
                persistence: SaveOutcome::Unchanged,
            };
        };

        let removed = self.items.remove(position);
        info!("Deleted item: {} ({})", removed.name, removed.id);

        DeleteItemResult {
            removed: Some(removed),
            persistence: self.save(),
        }
    }

    fn save(&self) -> SaveOutcome {
        match self.write_items() {
            Ok(()) => {
                debug!("Saved {} items under '{}'", self.items.len(), self.storage_key);
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!("Items kept in memory but not saved: {}", e);
                SaveOutcome::Failed(e)
            }
        }
    }

    fn write_items(&self) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_vec(&self.items)?;
        self.storage
            .put_value(&self.storage_key, &encoded)
            .map_err(PersistenceError::Write)
    }

    /// Items in insertion order
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&FoodItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }
}
