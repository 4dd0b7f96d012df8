//! Category API Handlers

use axum::{Json, extract::State};
use shared::models::Category;

use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::AppResult;

/// GET /categories - all menu categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.db).await?;
    Ok(Json(categories))
}
