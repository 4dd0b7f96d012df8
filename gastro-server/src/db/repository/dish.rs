//! Dish Repository

use super::{RepoError, RepoResult};
use shared::models::{Dish, DishCreate, MenuEntry};
use sqlx::SqlitePool;

/// Full menu with category names, grouped the way the POS displays it
pub async fn find_all_with_category(pool: &SqlitePool) -> RepoResult<Vec<MenuEntry>> {
    let rows = sqlx::query_as::<_, MenuEntry>(
        "SELECT d.dish_id, d.name, d.unit_price, c.category_id, c.name AS category_name \
         FROM dish d JOIN category c ON d.category_id = c.category_id \
         ORDER BY c.category_id, d.name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let row = sqlx::query_as::<_, Dish>(
        "SELECT dish_id, name, unit_price, category_id FROM dish WHERE dish_id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a new dish; the category must already exist
pub async fn create(pool: &SqlitePool, data: DishCreate) -> RepoResult<Dish> {
    if super::category::find_by_id(pool, data.category_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Validation(format!(
            "Category {} does not exist",
            data.category_id
        )));
    }

    let result = sqlx::query("INSERT INTO dish (name, category_id, unit_price) VALUES (?, ?, ?)")
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.unit_price)
        .execute(pool)
        .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
}
