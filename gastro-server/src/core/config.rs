/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden via environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | DATA_DIR | ./data | Directory holding the SQLite database |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | TAX_RATE | 0.21 | Tax multiplier applied to the subtotal |
/// | TIP_RATE | 0.0 | Default tip multiplier (a flat tip from the caller wins) |
/// | SUGGEST_API_URL | OpenAI chat completions | Completion endpoint |
/// | SUGGEST_API_KEY | unset | API key; unset disables suggestions |
/// | SUGGEST_MODEL | gpt-4o-mini | Model identifier |
/// | SUGGEST_TIMEOUT_MS | 10000 | Suggestion request timeout (ms) |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/var/lib/gastro HTTP_PORT=8080 TAX_RATE=0.12 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Directory holding the SQLite database file
    pub data_dir: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Tax multiplier applied to the subtotal (0.21 = 21%)
    pub tax_rate: f64,
    /// Default tip multiplier; a caller-supplied flat tip takes precedence
    pub tip_rate: f64,
    /// External suggestion service settings
    pub suggest: SuggestConfig,
}

/// Suggestion service configuration (external completion API)
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// API key; suggestions are disabled when unset
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: env_parse("HTTP_PORT", 3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            tax_rate: env_parse("TAX_RATE", 0.21),
            tip_rate: env_parse("TIP_RATE", 0.0),
            suggest: SuggestConfig::from_env(),
        }
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("gastro.db")
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl SuggestConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("SUGGEST_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into()),
            api_key: std::env::var("SUGGEST_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            model: std::env::var("SUGGEST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            timeout_ms: env_parse("SUGGEST_TIMEOUT_MS", 10_000),
        }
    }

    /// A configuration with suggestions switched off
    pub fn disabled() -> Self {
        Self {
            api_url: String::new(),
            api_key: None,
            model: String::new(),
            timeout_ms: 1_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
