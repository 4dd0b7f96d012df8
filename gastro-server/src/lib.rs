//! Gastro Server - restaurant ordering service
//!
//! # Architecture overview
//!
//! Staff configure a table, browse the menu, build up an order line by
//! line, and complete it. Totals are derived, never trusted from storage;
//! product suggestions come from an external completion service and are
//! strictly best-effort.
//!
//! # Module structure
//!
//! ```text
//! gastro-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── api/           # Routes and handlers
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── pricing/       # Pure totals calculator
//! ├── suggest/       # AI suggestion adapter
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod suggest;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::suggest::SuggestionService;
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from `LOG_LEVEL`/`LOG_DIR`
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
