use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::suggest::SuggestionService;
use crate::utils::AppError;

/// Server state - shared handles for all request handlers
///
/// Replaces any module-level connection singleton: every resource is
/// created in [`ServerState::initialize`] and injected into the router.
/// Cloning is cheap (pool handle + Arc'd service).
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | SqlitePool | SQLite connection pool |
/// | suggestions | SuggestionService | External suggestion adapter + cache |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub db: SqlitePool,
    /// AI suggestion adapter with per-order cache
    pub suggestions: SuggestionService,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Order of operations:
    /// 1. Ensure the data directory exists
    /// 2. Open the database (runs migrations)
    /// 3. Build the suggestion service from config
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_data_dir()
            .map_err(|e| AppError::internal(format!("Failed to create data directory: {e}")))?;

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let suggestions = SuggestionService::new(&config.suggest);

        Ok(Self {
            config: config.clone(),
            db: db_service.pool,
            suggestions,
        })
    }
}
