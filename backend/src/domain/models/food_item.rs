//! Domain model for a tracked food item.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::category::FoodCategory;

/// Identifier of a food item. Also used as the reminder identifier.
///
/// Displays as uppercase hyphenated text; serialized as a lowercase UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated().to_string().to_uppercase())
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A perishable item with an expiry date.
///
/// `days_left` is derived on every call and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    #[serde(with = "expiry_date")]
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub category: FoodCategory,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "image_data")]
    pub image_data: Option<Vec<u8>>,
}

impl FoodItem {
    /// Create an item with a fresh id, category `Other` and no image
    pub fn new(name: impl Into<String>, expiry_date: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            expiry_date,
            category: FoodCategory::default(),
            image_data: None,
        }
    }

    pub fn with_category(mut self, category: FoodCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_image_data(mut self, image_data: Vec<u8>) -> Self {
        self.image_data = Some(image_data);
        self
    }

    /// Calendar day of the expiry as seen from the given time zone
    pub fn expiry_day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.expiry_date.with_timezone(tz).date_naive()
    }

    /// Whole days from the start of `now`'s day to the start of the expiry day,
    /// both taken in `now`'s time zone. Negative once expired.
    pub fn days_left_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let today = now.date_naive();
        (self.expiry_day_in(&now.timezone()) - today).num_days()
    }

    /// Days left relative to the local wall clock
    pub fn days_left(&self) -> i64 {
        self.days_left_at(&chrono::Local::now())
    }

    pub fn has_image(&self) -> bool {
        self.image_data.is_some()
    }
}

/// Expiry dates are written as RFC 3339 strings. Older records stored a
/// number of seconds since 2001-01-01T00:00:00Z, which is still accepted.
mod expiry_date {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// 2001-01-01T00:00:00Z as a Unix timestamp
    const REFERENCE_DATE_UNIX_SECONDS: i64 = 978_307_200;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Seconds(f64),
    }

    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        match RawDate::deserialize(deserializer)? {
            RawDate::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|date| date.with_timezone(&Utc))
                .map_err(de::Error::custom),
            RawDate::Seconds(seconds) => {
                let reference = Utc
                    .timestamp_opt(REFERENCE_DATE_UNIX_SECONDS, 0)
                    .single()
                    .ok_or_else(|| de::Error::custom("invalid reference date"))?;
                let offset = Duration::try_milliseconds((seconds * 1000.0).round() as i64)
                    .ok_or_else(|| de::Error::custom(format!("date out of range: {}", seconds)))?;
                reference
                    .checked_add_signed(offset)
                    .ok_or_else(|| de::Error::custom(format!("date out of range: {}", seconds)))
            }
        }
    }
}

/// Image bytes travel as standard base64 text.
mod image_data {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        data: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text).map_err(de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_new_item_defaults() {
        let item = FoodItem::new("Bread", at("2025-06-10T08:00:00Z"));
        assert_eq!(item.name, "Bread");
        assert_eq!(item.category, FoodCategory::Other);
        assert!(item.image_data.is_none());
        assert!(!item.has_image());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = FoodItem::new("A", at("2025-06-10T08:00:00Z"));
        let b = FoodItem::new("B", at("2025-06-10T08:00:00Z"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_days_left_ignores_time_of_day() {
        let now = at("2025-06-01T23:30:00Z");
        let item = FoodItem::new("Yogurt", at("2025-06-04T00:15:00Z"));
        assert_eq!(item.days_left_at(&now), 3);

        let late_now = at("2025-06-01T00:01:00Z");
        let late_item = FoodItem::new("Yogurt", at("2025-06-04T23:59:00Z"));
        assert_eq!(late_item.days_left_at(&late_now), 3);
    }

    #[test]
    fn test_days_left_negative_and_zero() {
        let now = at("2025-06-10T12:00:00Z");
        assert_eq!(FoodItem::new("x", at("2025-06-10T01:00:00Z")).days_left_at(&now), 0);
        assert_eq!(FoodItem::new("x", at("2025-06-07T18:00:00Z")).days_left_at(&now), -3);
    }

    #[test]
    fn test_days_left_uses_observer_time_zone() {
        // 22:00 UTC on the 3rd is already the 4th in UTC+3
        let item = FoodItem::new("Cheese", at("2025-06-03T22:00:00Z"));
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(item.days_left_at(&now), 3);
        assert_eq!(item.days_left_at(&now.with_timezone(&Utc)), 2);
    }

    #[test]
    fn test_days_left_against_wall_clock() {
        let noon = (chrono::Local::now().date_naive() + Duration::days(10))
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let expiry = chrono::Local.from_local_datetime(&noon).single().unwrap();
        let item = FoodItem::new("Milk", expiry.with_timezone(&Utc));
        assert_eq!(item.days_left(), 10);
    }

    #[test]
    fn test_json_layout() {
        let item = FoodItem::new("Milk", at("2025-06-10T08:00:00Z"))
            .with_category(FoodCategory::Dairy)
            .with_image_data(vec![1, 2, 3]);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["name"], "Milk");
        assert_eq!(json["category"], "dairy");
        assert_eq!(json["imageData"], "AQID");
        assert_eq!(json["expiryDate"], "2025-06-10T08:00:00+00:00");
        assert_eq!(json["id"].as_str().unwrap(), item.id.as_uuid().to_string());
    }

    #[test]
    fn test_absent_image_is_omitted() {
        let item = FoodItem::new("Milk", at("2025-06-10T08:00:00Z"));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("imageData").is_none());
    }

    #[test]
    fn test_decodes_reference_date_seconds() {
        // 2025-01-01T00:00:00Z
        let json = r#"{
            "id": "5B1C9E2A-3F47-4D8B-9A61-0C2E7F4D8A13",
            "name": "Juice",
            "expiryDate": 757382400,
            "category": "drinks"
        }"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.expiry_date, at("2025-01-01T00:00:00Z"));
        assert_eq!(item.category, FoodCategory::Drinks);
        assert!(item.image_data.is_none());
        assert_eq!(item.id.to_string(), "5B1C9E2A-3F47-4D8B-9A61-0C2E7F4D8A13");
    }

    #[test]
    fn test_missing_category_defaults_to_other() {
        let json = r#"{
            "id": "5b1c9e2a-3f47-4d8b-9a61-0c2e7f4d8a13",
            "name": "Mystery",
            "expiryDate": "2025-01-01T00:00:00Z"
        }"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, FoodCategory::Other);
    }
}
