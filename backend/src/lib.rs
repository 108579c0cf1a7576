//! # Food Tracker Backend
//!
//! Core of a single-user food expiry tracker: an auto-persisted list of food
//! items and a local reminder three days before each item expires.
//!
//! [`FoodTracker`] wires the pieces together for a host application:
//! configuration, logging, storage, notification authorization and the
//! item store. Hosts supply the platform services through the traits in
//! [`platform`].

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod platform;
pub mod storage;

pub use config::TrackerConfig;
pub use domain::{FoodCategory, FoodItem, ItemId, ItemStore};
pub use storage::{FileConnection, FileKeyValueStore, KeyValueStorage};

use domain::{
    AddItemResult, DeleteItemResult, DraftError, ItemDraft, ItemFilter, ReminderScheduler,
};
use io::FoodItemMapper;
use platform::{AuthorizationOptions, NotificationService};
use shared::{CategoryChip, FoodItemCard};

/// Main tracker struct that owns the item store and its collaborators
pub struct FoodTracker {
    config: TrackerConfig,
    item_store: ItemStore,
}

impl FoodTracker {
    /// Open the tracker rooted at `data_directory`, creating the directory
    /// and a default config file when missing
    pub fn open<P: AsRef<Path>>(
        data_directory: P,
        notifications: Arc<dyn NotificationService>,
    ) -> Result<Self> {
        let connection = FileConnection::new(data_directory)?;
        let config = TrackerConfig::load_or_create(&connection)?;
        logging::init_logging(&config.log_level);
        info!("Opening food tracker at {:?}", connection.base_directory());

        let storage = Arc::new(FileKeyValueStore::new(connection));
        Ok(Self::with_storage(config, storage, notifications))
    }

    /// Open the tracker in the platform's per-user data directory
    pub fn open_default(notifications: Arc<dyn NotificationService>) -> Result<Self> {
        Self::open(FileConnection::default_data_directory()?, notifications)
    }

    /// Build the tracker on an already-constructed storage backend.
    ///
    /// Notification authorization is requested once here; a denial is only
    /// logged and reminders are still attempted on every add.
    pub fn with_storage(
        config: TrackerConfig,
        storage: Arc<dyn KeyValueStorage>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        if notifications.request_authorization(AuthorizationOptions::ALL) {
            info!("Notification authorization granted");
        } else {
            warn!("Notification authorization denied; reminders will not be delivered");
        }

        let scheduler = ReminderScheduler::new(notifications, config.reminder.clone());
        let item_store = ItemStore::load(storage, scheduler, config.storage_key.clone());

        Self { config, item_store }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn item_store(&self) -> &ItemStore {
        &self.item_store
    }

    pub fn add_item(&mut self, item: FoodItem) -> AddItemResult {
        self.item_store.add(item)
    }

    pub fn delete_item(&mut self, id: &ItemId) -> DeleteItemResult {
        self.item_store.delete(id)
    }

    /// Blank add-item draft using the configured default expiry
    pub fn new_draft(&self) -> ItemDraft {
        ItemDraft::for_today(self.config.view.default_expiry_days)
    }

    /// Commit `draft` and add the resulting item
    pub fn save_draft(&mut self, draft: ItemDraft) -> Result<AddItemResult, DraftError> {
        let item = draft.commit()?;
        Ok(self.item_store.add(item))
    }

    /// Cards for the items matching `filter`, fewest days left first
    pub fn cards_at<Tz: TimeZone>(
        &self,
        filter: &ItemFilter,
        now: &DateTime<Tz>,
    ) -> Vec<FoodItemCard> {
        let visible = filter.apply(self.item_store.items(), now);
        FoodItemMapper::to_card_list(visible, now, &self.config.view)
    }

    pub fn cards(&self, filter: &ItemFilter) -> Vec<FoodItemCard> {
        self.cards_at(filter, &Local::now())
    }

    pub fn category_chips(&self, filter: &ItemFilter) -> Vec<CategoryChip> {
        io::chips(filter.category)
    }
}
