//! Domain-level result types.
//!
//! Mutations never fail from the caller's point of view. Instead they report
//! what happened to the durability step and to the reminder, so hosts and
//! tests can inspect outcomes without a real storage backend.

pub mod items {
    use crate::domain::models::{FoodItem, ItemId};
    use crate::platform::{NotificationError, ReminderTrigger};

    #[derive(Debug, thiserror::Error)]
    pub enum PersistenceError {
        /// Unreachable with the built-in item types, whose JSON encoding
        /// cannot fail; kept so the save path surfaces encoder errors if the
        /// record format ever gains fallible fields
        #[error("Failed to encode items: {0}")]
        Encode(#[from] serde_json::Error),
        #[error("Failed to write items: {0:#}")]
        Write(anyhow::Error),
    }

    /// What happened to the persisted copy after a mutation
    #[derive(Debug)]
    pub enum SaveOutcome {
        /// The full collection was written
        Saved,
        /// Nothing changed, so nothing was written
        Unchanged,
        /// The in-memory change stands but was not written
        Failed(PersistenceError),
    }

    impl SaveOutcome {
        pub fn is_saved(&self) -> bool {
            matches!(self, SaveOutcome::Saved)
        }
    }

    /// What happened when asking for a reminder
    #[derive(Debug)]
    pub enum ReminderOutcome {
        Scheduled(ReminderTrigger),
        /// The expiry date is too close to the edge of the calendar to compute a trigger
        Unschedulable,
        Rejected(NotificationError),
    }

    impl ReminderOutcome {
        pub fn is_scheduled(&self) -> bool {
            matches!(self, ReminderOutcome::Scheduled(_))
        }
    }

    /// Result of adding an item
    #[derive(Debug)]
    pub struct AddItemResult {
        pub item_id: ItemId,
        pub persistence: SaveOutcome,
        pub reminder: ReminderOutcome,
    }

    /// Result of deleting an item
    #[derive(Debug)]
    pub struct DeleteItemResult {
        /// The removed item, `None` if the id was unknown
        pub removed: Option<FoodItem>,
        pub persistence: SaveOutcome,
    }
}
