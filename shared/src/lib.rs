use serde::{Deserialize, Serialize};
use std::fmt;

/// Freshness bucket of an item, used to pick badge colors and wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryStatus {
    /// Expiry day is today or already behind us
    Expired,
    /// A few days left; the reminder window
    ExpiringSoon,
    Fresh,
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Expired => write!(f, "expired"),
            ExpiryStatus::ExpiringSoon => write!(f, "expiring soon"),
            ExpiryStatus::Fresh => write!(f, "fresh"),
        }
    }
}

/// Display attributes for a food category.
/// The domain category carries none of these; they are looked up by tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Lowercase category tag as persisted ("dairy", "meat", ...)
    pub tag: String,
    pub label: String,
    /// Symbol name understood by the rendering toolkit
    pub icon: String,
    /// Color as `#RRGGBB`
    pub color: String,
}

/// One entry in the horizontal category filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChip {
    /// `None` for the "All" chip
    pub tag: Option<String>,
    pub label: String,
    pub icon: String,
    pub color: String,
    pub selected: bool,
}

/// Represents a food item formatted for the grid of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItemCard {
    pub id: String,
    pub name: String,
    /// Expiry day as YYYY-MM-DD
    pub formatted_expiry_date: String,
    pub days_left: i64,
    /// "Expired" or "N days"
    pub days_left_label: String,
    pub status: ExpiryStatus,
    /// Fill of the freshness bar, 0.0 to 1.0
    pub progress: f64,
    pub category: CategoryStyle,
    pub has_image: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_status_display() {
        assert_eq!(ExpiryStatus::Expired.to_string(), "expired");
        assert_eq!(ExpiryStatus::ExpiringSoon.to_string(), "expiring soon");
        assert_eq!(ExpiryStatus::Fresh.to_string(), "fresh");
    }

    #[test]
    fn test_card_serializes_status_as_variant_name() {
        let card = FoodItemCard {
            id: "abc".to_string(),
            name: "Milk".to_string(),
            formatted_expiry_date: "2025-03-01".to_string(),
            days_left: 2,
            days_left_label: "2 days".to_string(),
            status: ExpiryStatus::ExpiringSoon,
            progress: 2.0 / 14.0,
            category: CategoryStyle {
                tag: "dairy".to_string(),
                label: "Dairy".to_string(),
                icon: "carton".to_string(),
                color: "#30B0C7".to_string(),
            },
            has_image: false,
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["status"], "ExpiringSoon");
        assert_eq!(json["category"]["tag"], "dairy");

        let back: FoodItemCard = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
