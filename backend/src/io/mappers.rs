use chrono::{DateTime, TimeZone};
use shared::FoodItemCard;

use crate::config::ViewSettings;
use crate::domain::item_view::{expiry_status, freshness_progress};
use crate::domain::models::FoodItem;
use crate::io::category_styles::style_for;

pub struct FoodItemMapper;

impl FoodItemMapper {
    /// Convert a domain FoodItem to the card shown in the item grid,
    /// with days left measured from `now`
    pub fn to_card<Tz: TimeZone>(
        item: &FoodItem,
        now: &DateTime<Tz>,
        view: &ViewSettings,
    ) -> FoodItemCard {
        let days_left = item.days_left_at(now);

        FoodItemCard {
            id: item.id.to_string(),
            name: item.name.clone(),
            formatted_expiry_date: item
                .expiry_day_in(&now.timezone())
                .format("%Y-%m-%d")
                .to_string(),
            days_left,
            days_left_label: Self::days_left_label(days_left),
            status: expiry_status(days_left, view.soon_threshold_days),
            progress: freshness_progress(days_left, view.freshness_window_days),
            category: style_for(item.category),
            has_image: item.has_image(),
        }
    }

    /// Convert a list of items, keeping their order
    pub fn to_card_list<'a, Tz: TimeZone>(
        items: impl IntoIterator<Item = &'a FoodItem>,
        now: &DateTime<Tz>,
        view: &ViewSettings,
    ) -> Vec<FoodItemCard> {
        items
            .into_iter()
            .map(|item| Self::to_card(item, now, view))
            .collect()
    }

    pub fn days_left_label(days_left: i64) -> String {
        match days_left {
            d if d <= 0 => "Expired".to_string(),
            1 => "1 day".to_string(),
            d => format!("{} days", d),
        }
    }
}
