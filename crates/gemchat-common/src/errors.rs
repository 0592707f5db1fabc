use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure to resolve the secret for a provider.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("no credential found for '{provider}': {reason}")]
    NotFound { provider: String, reason: String },
}

impl CredentialError {
    pub fn not_found(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotFound {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GemchatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("{0}")]
    Other(String),
}
