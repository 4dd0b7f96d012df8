//! Order API Handlers
//!
//! Every mutation runs against an open order; completed orders are
//! terminal and reject further changes with a conflict. Suggestion
//! refreshes happen on background tasks after the mutation has committed,
//! so an unreachable suggestion service never fails an order operation.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::Value;
use shared::models::{
    NewOrderItem, OrderItemView, OrderStatus, OrderTotals, ProductSuggestion,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::pricing::{Tip, calculate_totals};
use crate::utils::validation::{MAX_NAME_LEN, validate_positive_money, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    #[serde(rename = "orderId")]
    pub order_id: i64,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Parse a path id explicitly so a malformed id yields the JSON 400 shape
fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid {what}")))
}

/// Load an order and reject the mutation once it is completed
async fn require_open(pool: &sqlx::SqlitePool, order_id: i64) -> Result<(), AppError> {
    let existing = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
    if existing.status == OrderStatus::Completed {
        return Err(AppError::conflict(format!(
            "Order {order_id} is already completed"
        )));
    }
    Ok(())
}

/// POST /orders/create - open a new order
pub async fn create(
    State(state): State<ServerState>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let order_id = order::create(&state.db).await?;
    Ok((StatusCode::CREATED, Json(OrderCreated { order_id })))
}

/// PUT /orders/{orderId}/complete - terminal transition, idempotent
pub async fn complete(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Message>> {
    let order_id = parse_id(&order_id, "order ID")?;

    order::complete(&state.db, order_id).await?;
    state.suggestions.invalidate(order_id);

    Ok(Json(Message::new("Order completed successfully")))
}

/// PUT /orders/{orderId}/update-total - write-through total snapshot
///
/// The caller supplies an already-computed value (see the totals
/// endpoint); nothing is recomputed here.
pub async fn update_total(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Message>> {
    let order_id = parse_id(&order_id, "order ID")?;

    let Some(total_price) = payload.get("total_price").and_then(Value::as_f64) else {
        return Err(AppError::validation("Invalid total price"));
    };
    if !total_price.is_finite() || total_price < 0.0 {
        return Err(AppError::validation("Invalid total price"));
    }

    require_open(&state.db, order_id).await?;
    order::update_total(&state.db, order_id, total_price).await?;

    Ok(Json(Message::new("Order total price updated successfully")))
}

/// GET /orders/{orderId}/items - ledger in insertion order
pub async fn list_items(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderItemView>>> {
    let order_id = parse_id(&order_id, "order ID")?;

    let items = order::list_items(&state.db, order_id).await?;
    Ok(Json(items.into_iter().map(OrderItemView::from).collect()))
}

/// POST /orders/{orderId}/items/add - append a line with snapshot values
///
/// The request body is an array of items; only the first element is
/// processed, matching the long-standing client contract. The requested
/// quantity is persisted on the single row (default 1 when omitted).
pub async fn add_items(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let order_id = parse_id(&order_id, "order ID")?;

    let Some(items) = payload.as_array() else {
        return Err(AppError::validation(
            "Invalid request body. Expected an array of order items.",
        ));
    };
    let Some(item) = items.first() else {
        return Err(AppError::validation("Invalid item data"));
    };

    let dish_id = item.get("dish_id").and_then(Value::as_i64);
    let ordered_name = item.get("ordered_name").and_then(Value::as_str);
    let ordered_unit_price = item.get("ordered_unit_price").and_then(Value::as_f64);
    let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(1);

    let (Some(dish_id), Some(ordered_name), Some(ordered_unit_price)) =
        (dish_id, ordered_name, ordered_unit_price)
    else {
        return Err(AppError::validation("Invalid item data"));
    };

    validate_required_text(ordered_name, "ordered_name", MAX_NAME_LEN)?;
    validate_positive_money(ordered_unit_price, "ordered_unit_price")?;
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }

    require_open(&state.db, order_id).await?;
    order::add_item(
        &state.db,
        order_id,
        NewOrderItem {
            dish_id,
            ordered_name: ordered_name.to_string(),
            ordered_unit_price,
            quantity,
        },
    )
    .await?;

    refresh_suggestions(&state, order_id).await;

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Item added to order successfully")),
    ))
}

/// DELETE /orders/{orderId}/items/{orderDishId}/delete - remove one line
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((order_id, order_dish_id)): Path<(String, String)>,
) -> AppResult<Json<Message>> {
    let order_id = parse_id(&order_id, "order ID")?;
    let order_dish_id = parse_id(&order_dish_id, "order item ID")?;

    require_open(&state.db, order_id).await?;
    order::remove_item(&state.db, order_id, order_dish_id).await?;

    refresh_suggestions(&state, order_id).await;

    Ok(Json(Message::new("Order item deleted successfully")))
}

/// GET /orders/{orderId}/totals - derived totals over the current ledger
///
/// `?tip=AMOUNT` supplies a flat tip; otherwise the configured tip rate
/// applies. The result is for display - persisting it still requires an
/// explicit update-total call.
pub async fn totals(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<OrderTotals>> {
    let order_id = parse_id(&order_id, "order ID")?;

    order::find_by_id(&state.db, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

    let tip = match params.get("tip") {
        Some(raw) => {
            let flat: f64 = raw
                .parse()
                .map_err(|_| AppError::validation("Invalid tip amount"))?;
            if !flat.is_finite() || flat < 0.0 {
                return Err(AppError::validation("Invalid tip amount"));
            }
            Tip::Flat(flat)
        }
        None => Tip::Rate(state.config.tip_rate),
    };

    let items = order::list_items(&state.db, order_id).await?;
    Ok(Json(calculate_totals(&items, state.config.tax_rate, tip)))
}

/// GET /orders/{orderId}/suggestions - cached suggestions, possibly stale
pub async fn suggestions(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<ProductSuggestion>>> {
    let order_id = parse_id(&order_id, "order ID")?;
    Ok(Json(state.suggestions.cached(order_id)))
}

/// Kick off a background suggestion refresh for the order's current items.
/// Best effort: failures are logged inside the service, never returned.
async fn refresh_suggestions(state: &ServerState, order_id: i64) {
    if !state.suggestions.is_enabled() {
        return;
    }
    match order::list_items(&state.db, order_id).await {
        Ok(items) => state.suggestions.refresh_in_background(order_id, &items),
        Err(e) => tracing::warn!(order_id, "Skipping suggestion refresh: {e}"),
    }
}
