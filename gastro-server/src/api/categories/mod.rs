//! Category API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Category router
pub fn router() -> Router<ServerState> {
    Router::new().route("/categories", get(handler::list))
}
