//! # Presentation Interface Layer
//!
//! Translates domain values into the DTOs of the `shared` crate. No business
//! rules live here; thresholds and calculations come from the domain layer.

pub mod category_styles;
pub mod mappers;

pub use category_styles::{chips, style_for};
pub use mappers::FoodItemMapper;
