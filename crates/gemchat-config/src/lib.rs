//! gemchat configuration system.
//!
//! TOML-based configuration with validation. All sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gemchat_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{GemchatConfig, CONFIG_SCHEMA_VERSION};
pub use validation::validate;

use gemchat_common::ConfigError;
use std::path::Path;

/// Load config from `path` if given, otherwise from the platform default.
///
/// An explicit path must exist; the default location is created on demand.
pub fn load_config(path: Option<&Path>) -> Result<GemchatConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &GemchatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
