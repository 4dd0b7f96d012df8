//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// GET /health - liveness plus a database ping
async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db)
        .await
    {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            "down"
        }
    };

    Json(HealthStatus {
        status: "ok",
        database,
    })
}
