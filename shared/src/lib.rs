//! Shared types for the Gastro ordering system
//!
//! Data models exchanged between the server and its clients, plus small
//! utility helpers. DB row types derive `sqlx::FromRow` behind the `db`
//! feature so a client crate can depend on the models without pulling in
//! sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
