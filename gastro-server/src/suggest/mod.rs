//! AI product-suggestion adapter
//!
//! Sends the current order's items to an external chat-completion service
//! and caches the returned suggestions per order. Strictly best-effort:
//! refreshes run on background tasks after ledger mutations, and failures
//! only ever reach the log - never an order-mutation response.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Deserialize;
use serde_json::json;
use shared::models::{OrderItem, ProductSuggestion};

use crate::core::SuggestConfig;
use crate::utils::AppError;

/// Suggestion service with a per-order result cache
#[derive(Clone)]
pub struct SuggestionService {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    cache: DashMap<i64, Vec<ProductSuggestion>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl SuggestionService {
    pub fn new(config: &SuggestConfig) -> Self {
        if config.api_key.is_none() {
            tracing::info!("Product suggestions disabled (no SUGGEST_API_KEY configured)");
        }

        let client = match reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build suggestion HTTP client with timeout: {e}");
                reqwest::Client::new()
            }
        };

        Self {
            inner: Arc::new(Inner {
                client,
                api_url: config.api_url.clone(),
                api_key: config.api_key.clone(),
                model: config.model.clone(),
                cache: DashMap::new(),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.api_key.is_some()
    }

    /// Cached suggestions for an order; empty when none have been produced
    pub fn cached(&self, order_id: i64) -> Vec<ProductSuggestion> {
        self.inner
            .cache
            .get(&order_id)
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Drop cached suggestions (order completed or emptied)
    pub fn invalidate(&self, order_id: i64) {
        self.inner.cache.remove(&order_id);
    }

    /// Spawn a background refresh for the order's current items.
    ///
    /// Fire-and-forget relative to the mutation path: the caller returns
    /// immediately and a failed refresh leaves the cache stale or empty.
    pub fn refresh_in_background(&self, order_id: i64, items: &[OrderItem]) {
        if !self.is_enabled() {
            return;
        }
        if items.is_empty() {
            self.invalidate(order_id);
            return;
        }

        let service = self.clone();
        let lines: Vec<(String, i64)> = items
            .iter()
            .map(|i| (i.ordered_name.clone(), i.quantity))
            .collect();

        tokio::spawn(async move {
            match service.fetch(&lines).await {
                Ok(suggestions) => {
                    tracing::debug!(order_id, count = suggestions.len(), "Suggestions refreshed");
                    service.inner.cache.insert(order_id, suggestions);
                }
                Err(e) => {
                    tracing::warn!(order_id, "Suggestion refresh failed: {e}");
                }
            }
        });
    }

    /// One round-trip to the completion service
    async fn fetch(&self, items: &[(String, i64)]) -> Result<Vec<ProductSuggestion>, AppError> {
        let Some(api_key) = &self.inner.api_key else {
            return Ok(Vec::new());
        };
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(items);

        let resp = self
            .inner
            .client
            .post(&self.inner.api_url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.inner.model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Suggestion service unreachable: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Suggestion service returned {status}: {text}"
            )));
        }

        let completion: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid completion response: {e}")))?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();

        parse_suggestions(content)
    }
}

/// Render the prompt, one `- {qty} x {name}` line per item
fn build_prompt(items: &[(String, i64)]) -> String {
    let mut prompt = String::from(
        "Based on the current order items, suggest relevant products that \
         the customer might also like to add to their order.\n\n\
         Current Order Items:\n",
    );
    for (name, quantity) in items {
        prompt.push_str(&format!("- {quantity} x {name}\n"));
    }
    prompt.push_str(
        "\nSuggest products that complement the existing order. Provide a \
         brief reason for each suggestion.\n\n\
         Format your output as a JSON array of objects with 'productName' \
         and 'reason' fields.",
    );
    prompt
}

/// Parse the model reply: a JSON array, possibly wrapped in a ``` fence
fn parse_suggestions(content: &str) -> Result<Vec<ProductSuggestion>, AppError> {
    let trimmed = content.trim();
    let json_text = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    serde_json::from_str(json_text)
        .map_err(|e| AppError::upstream(format!("Unparseable suggestion payload: {e}")))
}
