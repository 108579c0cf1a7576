//! Domain layer: item lifecycle, reminders, and list presentation logic.

pub mod commands;
pub mod item_draft;
pub mod item_store;
pub mod item_view;
pub mod models;
pub mod reminder_scheduler;

pub use commands::items::{
    AddItemResult, DeleteItemResult, PersistenceError, ReminderOutcome, SaveOutcome,
};
pub use item_draft::{DraftError, ItemDraft};
pub use item_store::ItemStore;
pub use item_view::{expiry_status, freshness_progress, ItemFilter};
pub use models::{FoodCategory, FoodItem, ItemId};
pub use reminder_scheduler::{reminder_trigger, ReminderScheduler};
