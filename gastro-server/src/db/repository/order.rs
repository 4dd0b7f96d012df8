//! Order Repository
//!
//! Order lifecycle plus the line-item ledger. Line rows snapshot
//! `ordered_name`/`ordered_unit_price` at insert time and are never
//! re-joined against the dish table.

use super::{RepoError, RepoResult};
use shared::models::{NewOrderItem, Order, OrderItem};
use sqlx::SqlitePool;

/// Create a new open order with a zero total snapshot; returns the new
/// order_id
pub async fn create(pool: &SqlitePool) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "INSERT INTO orders (status, total_price, consumption_date) VALUES ('open', 0, ?)",
    )
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(
        "SELECT order_id, status, total_price, consumption_date FROM orders WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Mark an order completed. Idempotent: completing an already-completed
/// order succeeds without change.
pub async fn complete(pool: &SqlitePool, order_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET status = 'completed' WHERE order_id = ?")
        .bind(order_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

/// Overwrite the persisted total snapshot. Callers supply an
/// already-computed value; this is a write-through display cache, not a
/// recomputation trigger.
pub async fn update_total(pool: &SqlitePool, order_id: i64, total_price: f64) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET total_price = ? WHERE order_id = ?")
        .bind(total_price)
        .bind(order_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

/// Append a line row with snapshot values; returns the new order_dish_id
pub async fn add_item(pool: &SqlitePool, order_id: i64, item: NewOrderItem) -> RepoResult<i64> {
    let result = sqlx::query(
        "INSERT INTO order_item (order_id, dish_id, ordered_name, ordered_unit_price, quantity) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(item.dish_id)
    .bind(&item.ordered_name)
    .bind(item.ordered_unit_price)
    .bind(item.quantity)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Delete a single line, scoped by both ids so one order cannot remove
/// another order's line
pub async fn remove_item(pool: &SqlitePool, order_id: i64, order_dish_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM order_item WHERE order_dish_id = ? AND order_id = ?")
        .bind(order_dish_id)
        .bind(order_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Order item {order_dish_id} not found in order {order_id}"
        )));
    }
    Ok(())
}

/// Line items in insertion order
pub async fn list_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(
        "SELECT order_dish_id, order_id, dish_id, ordered_name, ordered_unit_price, quantity \
         FROM order_item WHERE order_id = ? ORDER BY order_dish_id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
