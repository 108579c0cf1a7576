//! # Item Draft
//!
//! Unsaved state of the "add item" form. The photo is loaded by a background
//! task that writes into the draft only; nothing reaches the item store until
//! [`ItemDraft::commit`]. Choosing another photo, cancelling, or dropping the
//! draft aborts a load still in flight.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use log::{debug, warn};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::domain::models::{FoodCategory, FoodItem};
use crate::platform::PhotoPicker;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Item name cannot be empty")]
    EmptyName,
    #[error("Expiry date {0} cannot be represented")]
    InvalidExpiryDate(NaiveDate),
}

type PhotoSlot = Arc<Mutex<Option<Vec<u8>>>>;

pub struct ItemDraft {
    pub name: String,
    pub expiry_date: NaiveDate,
    pub category: FoodCategory,
    photo: PhotoSlot,
    photo_task: Option<JoinHandle<()>>,
}

impl ItemDraft {
    /// Blank draft expiring `default_expiry_days` after `today`, or `today`
    /// itself when that day is past the end of the calendar
    pub fn new(today: NaiveDate, default_expiry_days: u32) -> Self {
        let expiry_date = today
            .checked_add_days(Days::new(u64::from(default_expiry_days)))
            .unwrap_or_else(|| {
                warn!(
                    "Default expiry of {} days is out of range; using today",
                    default_expiry_days
                );
                today
            });

        Self {
            name: String::new(),
            expiry_date,
            category: FoodCategory::default(),
            photo: Arc::new(Mutex::new(None)),
            photo_task: None,
        }
    }

    /// Blank draft relative to the local calendar
    pub fn for_today(default_expiry_days: u32) -> Self {
        Self::new(Local::now().date_naive(), default_expiry_days)
    }

    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Start loading a photo, replacing any load still running
    pub fn start_photo_load(&mut self, picker: Arc<dyn PhotoPicker>) {
        self.cancel_photo_load();

        let slot = Arc::clone(&self.photo);
        self.photo_task = Some(tokio::spawn(async move {
            match picker.pick_image().await {
                Ok(Some(bytes)) => {
                    debug!("Photo loaded into draft ({} bytes)", bytes.len());
                    match slot.lock() {
                        Ok(mut photo) => *photo = Some(bytes),
                        Err(_) => warn!("Draft photo slot poisoned; photo discarded"),
                    }
                }
                Ok(None) => debug!("No photo chosen"),
                Err(e) => warn!("Failed to load photo: {:#}", e),
            }
        }));
    }

    pub fn cancel_photo_load(&mut self) {
        if let Some(task) = self.photo_task.take() {
            task.abort();
            debug!("Photo load cancelled");
        }
    }

    pub fn is_loading_photo(&self) -> bool {
        self.photo_task
            .as_ref()
            .map_or(false, |task| !task.is_finished())
    }

    /// Wait for the photo load in flight, if any
    pub async fn finish_photo_load(&mut self) {
        if let Some(task) = self.photo_task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Photo load task failed: {}", e);
                }
            }
        }
    }

    pub fn image_data(&self) -> Option<Vec<u8>> {
        self.photo
            .lock()
            .map(|photo| photo.clone())
            .unwrap_or(None)
    }

    pub fn clear_photo(&mut self) {
        self.cancel_photo_load();
        if let Ok(mut photo) = self.photo.lock() {
            *photo = None;
        }
    }

    /// Turn the draft into a new item, expiring at noon of the chosen day in
    /// the local calendar
    pub fn commit(self) -> Result<FoodItem, DraftError> {
        self.commit_in(&Local)
    }

    pub fn commit_in<Tz: TimeZone>(mut self, tz: &Tz) -> Result<FoodItem, DraftError> {
        if !self.can_save() {
            return Err(DraftError::EmptyName);
        }

        let expiry = expiry_instant(self.expiry_date, tz)
            .ok_or(DraftError::InvalidExpiryDate(self.expiry_date))?;
        let image_data = self.photo.lock().ok().and_then(|mut photo| photo.take());

        let mut item = FoodItem::new(self.name.trim(), expiry).with_category(self.category);
        item.image_data = image_data;

        self.cancel_photo_load();
        Ok(item)
    }
}

impl Drop for ItemDraft {
    fn drop(&mut self) {
        self.cancel_photo_load();
    }
}

/// Noon keeps the calendar day stable across DST shifts and small offsets
fn expiry_instant<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let noon = date.and_hms_opt(12, 0, 0)?;
    tz.from_local_datetime(&noon)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::FixedOffset;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    struct ReadyPicker(Option<Vec<u8>>);

    #[async_trait]
    impl PhotoPicker for ReadyPicker {
        async fn pick_image(&self) -> anyhow::Result<Option<Vec<u8>>> {
            Ok(self.0.clone())
        }
    }

    struct FailingPicker;

    #[async_trait]
    impl PhotoPicker for FailingPicker {
        async fn pick_image(&self) -> anyhow::Result<Option<Vec<u8>>> {
            Err(anyhow::anyhow!("transfer failed"))
        }
    }

    /// Blocks until released, then yields its bytes
    struct GatedPicker {
        gate: Arc<Notify>,
        bytes: Vec<u8>,
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl PhotoPicker for GatedPicker {
        async fn pick_image(&self) -> anyhow::Result<Option<Vec<u8>>> {
            self.gate.notified().await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(Some(self.bytes.clone()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 25).unwrap()
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = ItemDraft::new(today(), 7);
        assert_eq!(draft.name, "");
        assert_eq!(draft.expiry_date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(draft.category, FoodCategory::Other);
        assert!(draft.image_data().is_none());
        assert!(!draft.can_save());
    }

    #[test]
    fn test_out_of_range_default_expiry_falls_back_to_today() {
        let draft = ItemDraft::new(today(), u32::MAX);
        assert_eq!(draft.expiry_date, today());

        let last_day = NaiveDate::MAX;
        assert_eq!(ItemDraft::new(last_day, 1).expiry_date, last_day);
    }

    #[test]
    fn test_blank_name_cannot_commit() {
        let mut draft = ItemDraft::new(today(), 7);
        draft.name = "   ".to_string();
        assert!(!draft.can_save());
        assert_eq!(draft.commit_in(&Utc).unwrap_err(), DraftError::EmptyName);
    }

    #[test]
    fn test_commit_builds_item() {
        let mut draft = ItemDraft::new(today(), 7);
        draft.name = "  Labneh ".to_string();
        draft.category = FoodCategory::Dairy;

        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let item = draft.commit_in(&tz).unwrap();

        assert_eq!(item.name, "Labneh");
        assert_eq!(item.category, FoodCategory::Dairy);
        assert_eq!(item.expiry_day_in(&tz), NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert!(item.image_data.is_none());

        let now = tz.with_ymd_and_hms(2025, 2, 25, 8, 0, 0).unwrap();
        assert_eq!(item.days_left_at(&now), 7);
    }

    #[tokio::test]
    async fn test_photo_load_fills_draft() {
        let mut draft = ItemDraft::new(today(), 7);
        draft.name = "Cake".to_string();

        draft.start_photo_load(Arc::new(ReadyPicker(Some(vec![7, 7, 7]))));
        draft.finish_photo_load().await;

        assert!(!draft.is_loading_photo());
        assert_eq!(draft.image_data(), Some(vec![7, 7, 7]));
        let item = draft.commit_in(&Utc).unwrap();
        assert_eq!(item.image_data, Some(vec![7, 7, 7]));
    }

    #[tokio::test]
    async fn test_failed_or_empty_pick_leaves_image_unset() {
        let mut draft = ItemDraft::new(today(), 7);

        draft.start_photo_load(Arc::new(FailingPicker));
        draft.finish_photo_load().await;
        assert!(draft.image_data().is_none());

        draft.start_photo_load(Arc::new(ReadyPicker(None)));
        draft.finish_photo_load().await;
        assert!(draft.image_data().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_load_never_writes() {
        let gate = Arc::new(Notify::new());
        let finished = Arc::new(AtomicBool::new(false));
        let mut draft = ItemDraft::new(today(), 7);

        draft.start_photo_load(Arc::new(GatedPicker {
            gate: gate.clone(),
            bytes: vec![1],
            finished: finished.clone(),
        }));
        assert!(draft.is_loading_photo());

        draft.cancel_photo_load();
        gate.notify_one();
        tokio::task::yield_now().await;

        assert!(!finished.load(Ordering::SeqCst));
        assert!(draft.image_data().is_none());
    }

    #[tokio::test]
    async fn test_new_selection_supersedes_previous_load() {
        let gate = Arc::new(Notify::new());
        let finished = Arc::new(AtomicBool::new(false));
        let mut draft = ItemDraft::new(today(), 7);

        draft.start_photo_load(Arc::new(GatedPicker {
            gate: gate.clone(),
            bytes: vec![1],
            finished: finished.clone(),
        }));
        draft.start_photo_load(Arc::new(ReadyPicker(Some(vec![2]))));
        draft.finish_photo_load().await;
        gate.notify_one();
        tokio::task::yield_now().await;

        assert_eq!(draft.image_data(), Some(vec![2]));
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_clear_photo() {
        let mut draft = ItemDraft::new(today(), 7);
        draft.start_photo_load(Arc::new(ReadyPicker(Some(vec![9]))));
        draft.finish_photo_load().await;

        draft.clear_photo();
        assert!(draft.image_data().is_none());
    }
}
