//! Category Repository

use super::RepoResult;
use shared::models::Category;
use sqlx::SqlitePool;

/// All categories in id order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT category_id, name FROM category ORDER BY category_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT category_id, name FROM category WHERE category_id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
