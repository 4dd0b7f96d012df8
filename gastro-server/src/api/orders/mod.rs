//! Order API Module
//!
//! Order lifecycle, the line-item ledger, derived totals, and cached
//! product suggestions.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders/create", post(handler::create))
        .route("/orders/{order_id}/complete", put(handler::complete))
        .route("/orders/{order_id}/update-total", put(handler::update_total))
        .route("/orders/{order_id}/items", get(handler::list_items))
        .route("/orders/{order_id}/items/add", post(handler::add_items))
        .route(
            "/orders/{order_id}/items/{order_dish_id}/delete",
            delete(handler::remove_item),
        )
        .route("/orders/{order_id}/totals", get(handler::totals))
        .route("/orders/{order_id}/suggestions", get(handler::suggestions))
}
