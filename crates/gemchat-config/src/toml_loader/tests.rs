//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use gemchat_common::{ConfigError, ContextPolicy, SystemInstructionMode};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_gemchat_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[provider]
model = "gemini-1.5-pro"

[session]
mode = "native"
system_instruction = "You are a cat."
context = "latest"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.provider.model, "gemini-1.5-pro");
    assert_eq!(config.session.mode, SystemInstructionMode::Native);
    assert_eq!(config.session.context, ContextPolicy::Latest);
    // Defaults preserved
    assert_eq!(config.provider.max_output_tokens, 4096);
    assert_eq!(config.display.user_prompt, "[User]: ");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_keeps_invalid_values_for_later_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[provider]\ntemperature = 7.5\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.provider.temperature - 7.5).abs() < f64::EPSILON);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gemchat").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.provider.model, "gemini-2.0-flash");
    assert_eq!(config.session.mode, SystemInstructionMode::None);
}

#[test]
fn default_config_toml_documents_the_default_endpoint() {
    use super::template::default_config_toml;
    use gemchat_common::DEFAULT_BASE_URL;

    assert!(default_config_toml().contains(&format!("# base_url = \"{DEFAULT_BASE_URL}\"")));
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::GemchatConfig;

    let config: GemchatConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("gemchat"));
        assert!(path_str.ends_with("config.toml"));
    }
}
