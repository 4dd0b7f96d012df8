//! Menu API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;
use shared::models::{DishCreate, MenuEntry};

use crate::core::ServerState;
use crate::db::repository::dish;
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative_money, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct DishAdded {
    pub message: String,
    #[serde(rename = "dishId")]
    pub dish_id: i64,
}

/// GET /menu (alias /dishes) - full menu joined with category names
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuEntry>>> {
    let entries = dish::find_all_with_category(&state.db).await?;
    Ok(Json(entries))
}

/// POST /menu/add - add a dish to the catalog
///
/// The payload is checked field by field so a partial body yields the
/// documented `Missing required fields` message rather than a
/// deserialization error.
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<DishAdded>)> {
    let name = payload.get("name").and_then(Value::as_str);
    let category_id = payload.get("category_id").and_then(Value::as_i64);
    let unit_price = payload.get("unit_price").and_then(Value::as_f64);

    let (Some(name), Some(category_id), Some(unit_price)) = (name, category_id, unit_price)
    else {
        return Err(AppError::validation("Missing required fields"));
    };

    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_non_negative_money(unit_price, "unit_price")?;

    let dish = dish::create(
        &state.db,
        DishCreate {
            name: name.to_string(),
            category_id,
            unit_price,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DishAdded {
            message: "Dish added successfully".to_string(),
            dish_id: dish.dish_id,
        }),
    ))
}
