//! Dish Model

use serde::{Deserialize, Serialize};

/// Dish entity as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub dish_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub category_id: i64,
}

/// Menu row: dish joined with its category name, the shape the POS
/// front-end renders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuEntry {
    pub dish_id: i64,
    pub name: String,
    pub unit_price: f64,
    pub category_id: i64,
    pub category_name: String,
}

/// Create dish payload (validated before construction)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub category_id: i64,
    pub unit_price: f64,
}
