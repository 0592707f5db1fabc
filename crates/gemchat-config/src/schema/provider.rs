//! Remote model configuration.

use gemchat_common::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Which model to talk to and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    pub base_url: String,
    /// Upper bound on reply length (must be > 0).
    pub max_output_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Valid range: 1-300.
    pub connect_timeout_secs: u32,
    /// Valid range: 1-3600.
    pub request_timeout_secs: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            base_url: DEFAULT_BASE_URL.into(),
            max_output_tokens: 4096,
            temperature: 0.7,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
