pub mod category;
pub mod food_item;

pub use category::FoodCategory;
pub use food_item::{FoodItem, ItemId};
