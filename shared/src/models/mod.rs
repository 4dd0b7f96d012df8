//! Data models
//!
//! Shared between gastro-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod dish;
pub mod order;
pub mod suggestion;

// Re-exports
pub use category::*;
pub use dish::*;
pub use order::*;
pub use suggestion::*;
