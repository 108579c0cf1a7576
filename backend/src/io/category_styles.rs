//! Display attributes per category, kept apart from the domain enum so the
//! model stays free of presentation concerns.

use shared::{CategoryChip, CategoryStyle};

use crate::domain::models::FoodCategory;

const ALL_LABEL: &str = "All";
const ALL_ICON: &str = "square.grid.2x2.fill";
const ALL_COLOR: &str = "#8E8E93";

/// Label, icon and color for `category`
pub fn style_for(category: FoodCategory) -> CategoryStyle {
    let (label, icon, color) = match category {
        FoodCategory::Dairy => ("Dairy", "carton", "#30B0C7"),
        FoodCategory::Meat => ("Meat", "fork.knife", "#FF3B30"),
        FoodCategory::Produce => ("Produce", "leaf", "#34C759"),
        FoodCategory::Snacks => ("Snacks", "takeoutbag.and.cup.and.straw", "#FF9500"),
        FoodCategory::Drinks => ("Drinks", "cup.and.saucer.fill", "#007AFF"),
        FoodCategory::Frozen => ("Frozen", "snowflake", "#00C7BE"),
        FoodCategory::Bakery => ("Bakery", "birthday.cake", "#A2845E"),
        FoodCategory::Other => ("Other", "shippingbox", "#8E8E93"),
    };

    CategoryStyle {
        tag: category.as_str().to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

/// Filter bar entries: "All" first, then every category in declaration order
pub fn chips(selected: Option<FoodCategory>) -> Vec<CategoryChip> {
    let all = CategoryChip {
        tag: None,
        label: ALL_LABEL.to_string(),
        icon: ALL_ICON.to_string(),
        color: ALL_COLOR.to_string(),
        selected: selected.is_none(),
    };

    std::iter::once(all)
        .chain(FoodCategory::ALL.iter().map(|&category| {
            let style = style_for(category);
            CategoryChip {
                tag: Some(style.tag),
                label: style.label,
                icon: style.icon,
                color: style.color,
                selected: selected == Some(category),
            }
        }))
        .collect()
}
