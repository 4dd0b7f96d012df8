//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Menu router
///
/// `/dishes` is a legacy alias for `/menu` kept for client compatibility.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/menu", get(handler::list))
        .route("/dishes", get(handler::list))
        .route("/menu/add", post(handler::add))
}
