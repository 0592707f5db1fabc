//! API key resolution.
//!
//! Credentials are injected into the app through `CredentialProvider`
//! rather than read ad hoc, so tests can swap in their own source.

use std::path::{Path, PathBuf};

use gemchat_common::CredentialError;
use tracing::debug;

/// Looks up the secret for a named provider.
pub trait CredentialProvider: Send + Sync {
    fn get_credential(&self, provider: &str) -> Result<String, CredentialError>;
}

/// Reads the first line of a key file formatted `name:secret`.
///
/// Anything after the first line is ignored. The name is the text before
/// the first `:` and the secret the text after the last one; a line
/// without `:` is taken as a bare secret.
#[derive(Debug, Clone)]
pub struct KeyFileCredentials {
    path: PathBuf,
}

impl KeyFileCredentials {
    /// A leading `~/` is expanded to the home directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_home(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for KeyFileCredentials {
    fn get_credential(&self, provider: &str) -> Result<String, CredentialError> {
        let shown = self.path.display();
        let data = std::fs::read_to_string(&self.path).map_err(|e| {
            CredentialError::not_found(provider, format!("cannot read {shown}: {e}"))
        })?;
        parse_key_line(provider, data.lines().next().unwrap_or_default())
            .map_err(|reason| CredentialError::not_found(provider, format!("{shown}: {reason}")))
    }
}

fn parse_key_line(provider: &str, line: &str) -> Result<String, String> {
    let line = line.trim();
    if line.is_empty() {
        return Err("first line is empty".into());
    }

    let (name, secret) = match (line.split_once(':'), line.rsplit_once(':')) {
        (Some((name, _)), Some((_, secret))) => (name.trim(), secret.trim()),
        _ => ("", line),
    };

    if !name.is_empty() && !name.eq_ignore_ascii_case(provider) {
        return Err(format!("key is for '{name}'"));
    }
    if secret.is_empty() {
        return Err("secret is empty".into());
    }
    Ok(secret.to_string())
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Reads the secret from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentials {
    fn get_credential(&self, provider: &str) -> Result<String, CredentialError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            Ok(_) => Err(CredentialError::not_found(provider, format!("{} is empty", self.var))),
            Err(_) => Err(CredentialError::not_found(provider, format!("{} is not set", self.var))),
        }
    }
}

/// Tries each source in order and returns the first secret found.
#[derive(Default)]
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl CredentialProvider + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl CredentialProvider for CredentialChain {
    fn get_credential(&self, provider: &str) -> Result<String, CredentialError> {
        let mut reasons = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            match source.get_credential(provider) {
                Ok(secret) => return Ok(secret),
                Err(CredentialError::NotFound { reason, .. }) => {
                    debug!(provider, %reason, "credential source missed");
                    reasons.push(reason);
                }
            }
        }
        if reasons.is_empty() {
            reasons.push("no credential sources configured".into());
        }
        Err(CredentialError::not_found(provider, reasons.join("; ")))
    }
}
