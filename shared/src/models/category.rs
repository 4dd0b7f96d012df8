//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category (static reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub category_id: i64,
    pub name: String,
}
