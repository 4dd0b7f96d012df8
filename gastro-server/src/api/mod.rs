//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness and database ping
//! - [`categories`] - menu categories
//! - [`menu`] - dish catalog
//! - [`orders`] - order lifecycle, line items, totals, suggestions

pub mod categories;
pub mod health;
pub mod menu;
pub mod orders;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(menu::router())
        .merge(orders::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
