//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Runtime settings for the stock engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSettings {
    /// Default hold expiration in minutes, applied when a hold is
    /// created without an explicit `expires_at`. 0 = no expiration.
    #[serde(default = "default_hold_ttl_minutes")]
    pub hold_ttl_minutes: u32,
    /// Holds processed per sweeper batch.
    #[serde(default = "default_expired_batch_size")]
    pub expired_batch_size: usize,
    /// Run every incoming SKU through the validator before mutating
    /// stock.
    #[serde(default = "default_validate_input_skus")]
    pub validate_input_skus: bool,
}

fn default_hold_ttl_minutes() -> u32 {
    0
}

fn default_expired_batch_size() -> usize {
    200
}

fn default_validate_input_skus() -> bool {
    false
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            hold_ttl_minutes: default_hold_ttl_minutes(),
            expired_batch_size: default_expired_batch_size(),
            validate_input_skus: default_validate_input_skus(),
        }
    }
}

impl StockSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
