//! Order Model
//!
//! An order is `open` until explicitly completed; completion is terminal.
//! Line items snapshot `ordered_name`/`ordered_unit_price` at add time so
//! historical orders are immune to later catalog price changes.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Open,
    Completed,
}

/// Order entity
///
/// `total_price` is a persisted display snapshot written through
/// explicitly by the client; it is never recomputed implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_price: f64,
    /// Creation timestamp, unix millis
    pub consumption_date: i64,
}

/// Order line item as stored in the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_dish_id: i64,
    pub order_id: i64,
    pub dish_id: i64,
    pub ordered_name: String,
    pub ordered_unit_price: f64,
    pub quantity: i64,
}

/// Line item wire shape for `GET /orders/{id}/items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub dish_id: i64,
    pub ordered_name: String,
    pub quantity: i64,
    pub order_dish_id: i64,
}

impl From<OrderItem> for OrderItemView {
    fn from(item: OrderItem) -> Self {
        Self {
            dish_id: item.dish_id,
            ordered_name: item.ordered_name,
            quantity: item.quantity,
            order_dish_id: item.order_dish_id,
        }
    }
}

/// Add line item payload (validated before construction)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub dish_id: i64,
    pub ordered_name: String,
    pub ordered_unit_price: f64,
    pub quantity: i64,
}

/// Display totals derived from the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub tip: f64,
    pub total: f64,
}
