//! Where the API key comes from.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Name expected before the `:` on the key file's first line.
    pub provider_name: String,
    /// Key file holding `name:secret` on its first line.
    pub key_file: String,
    /// Environment variable checked before the key file.
    pub env_var: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            provider_name: "gemini".into(),
            key_file: "keys.txt".into(),
            env_var: "GEMINI_API_KEY".into(),
        }
    }
}
