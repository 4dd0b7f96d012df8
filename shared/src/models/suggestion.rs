//! Product Suggestion Model

use serde::{Deserialize, Serialize};

/// One AI-generated product suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSuggestion {
    #[serde(rename = "productName")]
    pub product_name: String,
    pub reason: String,
}
