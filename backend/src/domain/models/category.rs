//! Domain model for food categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of categories an item can belong to.
///
/// Persisted as the lowercase tag. Labels, icons and colors are a
/// presentation concern and live in `io::category_styles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Dairy,
    Meat,
    Produce,
    Snacks,
    Drinks,
    Frozen,
    Bakery,
    #[default]
    Other,
}

impl FoodCategory {
    /// All categories in display order
    pub const ALL: [FoodCategory; 8] = [
        FoodCategory::Dairy,
        FoodCategory::Meat,
        FoodCategory::Produce,
        FoodCategory::Snacks,
        FoodCategory::Drinks,
        FoodCategory::Frozen,
        FoodCategory::Bakery,
        FoodCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Dairy => "dairy",
            FoodCategory::Meat => "meat",
            FoodCategory::Produce => "produce",
            FoodCategory::Snacks => "snacks",
            FoodCategory::Drinks => "drinks",
            FoodCategory::Frozen => "frozen",
            FoodCategory::Bakery => "bakery",
            FoodCategory::Other => "other",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Invalid food category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_other() {
        assert_eq!(FoodCategory::default(), FoodCategory::Other);
    }

    #[test]
    fn test_tags_match_serde() {
        for category in FoodCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("dairy".parse::<FoodCategory>().unwrap(), FoodCategory::Dairy);
        assert_eq!(" Bakery ".parse::<FoodCategory>().unwrap(), FoodCategory::Bakery);
        assert!("candy".parse::<FoodCategory>().is_err());
    }
}
