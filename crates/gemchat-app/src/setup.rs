//! Wiring config into credentials, the Gemini client and a session.

use std::sync::Arc;
use std::time::Duration;

use gemchat_ai::{
    ConversationSession, CredentialChain, CredentialProvider, EnvCredentials, GeminiClient,
    GeminiConfig, GenerationConfig, KeyFileCredentials, TextGenerationProvider,
};
use gemchat_common::GemchatError;
use gemchat_config::schema::{CredentialsConfig, ProviderConfig};
use gemchat_config::GemchatConfig;
use tracing::debug;

/// Environment variable first, then the key file.
pub fn credential_chain(config: &CredentialsConfig) -> CredentialChain {
    CredentialChain::new()
        .with(EnvCredentials::new(&config.env_var))
        .with(KeyFileCredentials::new(&config.key_file))
}

pub fn gemini_client(config: &ProviderConfig, api_key: String) -> Result<GeminiClient, GemchatError> {
    let gemini = GeminiConfig::new(api_key)
        .with_base_url(&config.base_url)
        .with_connect_timeout(Duration::from_secs(config.connect_timeout_secs.into()))
        .with_request_timeout(Duration::from_secs(config.request_timeout_secs.into()));
    debug!(?gemini, "building Gemini client");
    GeminiClient::new(gemini).map_err(|e| GemchatError::Ai(e.to_string()))
}

pub fn open_session(
    config: &GemchatConfig,
    provider: Arc<dyn TextGenerationProvider>,
) -> Result<ConversationSession, GemchatError> {
    let session = &config.session;
    let mut builder = ConversationSession::builder(provider, &config.provider.model)
        .mode(session.mode)
        .context_policy(session.context)
        .generation_config(GenerationConfig {
            max_output_tokens: config.provider.max_output_tokens,
            temperature: config.provider.temperature,
            code_execution: session.code_execution,
        });
    if let Some(instruction) = &session.system_instruction {
        builder = builder.system_instruction(instruction);
    }
    builder.build().map_err(|e| GemchatError::Other(e.to_string()))
}

/// Resolve the API key and open a session against Gemini.
pub fn connect(config: &GemchatConfig) -> Result<ConversationSession, GemchatError> {
    let api_key = credential_chain(&config.credentials)
        .get_credential(&config.credentials.provider_name)?;
    let client = gemini_client(&config.provider, api_key)?;
    open_session(config, Arc::new(client))
}
