//! # Item View
//!
//! Query-side helpers for presenting the item list: category filter, name
//! search, ordering by days left, and freshness classification.
//! Nothing here mutates or persists anything.

use chrono::{DateTime, TimeZone};
use shared::ExpiryStatus;

use crate::domain::models::{FoodCategory, FoodItem};

/// Current category selection and search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: Option<FoodCategory>,
    pub query: String,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: FoodCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Select `category`, or clear the selection if it is already selected
    pub fn toggle_category(&mut self, category: FoodCategory) {
        self.category = if self.category == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    pub fn clear_category(&mut self) {
        self.category = None;
    }

    pub fn matches(&self, item: &FoodItem) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }

        // Whitespace-only means no search; otherwise the query is matched as typed
        self.query.trim().is_empty()
            || item.name.to_lowercase().contains(&self.query.to_lowercase())
    }

    /// Matching items, fewest days left first. Ties keep insertion order.
    pub fn apply<'a, Tz: TimeZone>(
        &self,
        items: &'a [FoodItem],
        now: &DateTime<Tz>,
    ) -> Vec<&'a FoodItem> {
        let mut visible: Vec<(i64, &FoodItem)> = items
            .iter()
            .filter(|item| self.matches(item))
            .map(|item| (item.days_left_at(now), item))
            .collect();
        visible.sort_by_key(|(days_left, _)| *days_left);
        visible.into_iter().map(|(_, item)| item).collect()
    }
}

/// Expired at zero days left or fewer, expiring soon up to `soon_threshold_days`
pub fn expiry_status(days_left: i64, soon_threshold_days: i64) -> ExpiryStatus {
    if days_left <= 0 {
        ExpiryStatus::Expired
    } else if days_left <= soon_threshold_days {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Fresh
    }
}

/// Fill of the freshness bar: `days_left / window_days`, clamped to [0, 1]
pub fn freshness_progress(days_left: i64, window_days: u32) -> f64 {
    if window_days == 0 {
        return 0.0;
    }
    (days_left as f64 / f64::from(window_days)).clamp(0.0, 1.0)
}
