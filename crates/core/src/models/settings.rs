use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::page::{DisplayMode, PageSize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Page configuration. Every field has a default, so a partial JSON document
/// (or none at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the transactions API (without the `/transactions` path)
    pub api_base_url: String,

    /// Latest-rates endpoint, USD based
    pub exchange_rate_url: String,

    /// Per-request timeout for both APIs (native targets only)
    pub request_timeout_secs: u64,

    pub default_page_size: PageSize,

    pub default_display_mode: DisplayMode,

    /// Currency that converted mode renders into (e.g., "KRW", "USD")
    pub preferred_currency: String,

    /// Log level for `logging::init_logger` (TRACE, DEBUG, INFO, WARN, ERROR)
    pub verbosity: String,
}

impl Settings {
    /// Parse settings from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            exchange_rate_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
            request_timeout_secs: 30,
            default_page_size: PageSize::default(),
            default_display_mode: DisplayMode::default(),
            preferred_currency: "USD".to_string(),
            verbosity: "INFO".to_string(),
        }
    }
}
