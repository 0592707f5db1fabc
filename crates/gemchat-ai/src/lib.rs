//! Conversation engine for gemchat.
//!
//! Provides:
//! - `ConversationSession`: transcript, system-instruction policy, rollback on failure
//! - `TextGenerationProvider`: the seam to a remote model, with a Gemini client
//! - Credential providers for key files and environment variables
//! - Rendering of multi-part responses (text, code, execution results, binary data)
//! - Token usage tracking

pub mod credentials;
pub mod gemini;
pub mod render;
pub mod session;
pub mod token_tracker;
pub mod turn;

use async_trait::async_trait;
use gemchat_common::SessionId;

pub use credentials::{CredentialChain, CredentialProvider, EnvCredentials, KeyFileCredentials};
pub use gemini::{GeminiClient, GeminiConfig};
pub use render::{render_part, render_turn, PartKind, RenderedPart};
pub use session::{is_termination_token, ConversationSession, SessionBuilder, SessionError};
pub use token_tracker::TokenTracker;
pub use turn::{Part, Role, Turn, TurnMetadata};

/// A remote service that turns a prompt into a reply.
///
/// Implementations are stateless from the session's point of view: every
/// call carries all the context the provider should see.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Short provider name used for usage accounting and logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, AiError>;

    /// Release any server-side state tied to `session`.
    fn end_session(&self, _session: &SessionId) {}
}

/// Sampling and tool settings sent with every call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f64,
    /// Enable the provider's server-side code execution tool.
    pub code_execution: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 4096,
            temperature: 0.7,
            code_execution: false,
        }
    }
}

/// Everything a provider needs for one call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub contents: Vec<Turn>,
    /// Native system instruction, if the session uses one.
    pub system_instruction: Option<String>,
    pub config: GenerationConfig,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub parts: Vec<Part>,
    pub usage: TokenUsage,
}

impl AiResponse {
    /// Response made of a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
            usage: TokenUsage::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 5,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn text_response_has_one_part() {
        let response = AiResponse::text("meow");
        assert_eq!(response.parts, vec![Part::text("meow")]);
        assert_eq!(response.usage.total_tokens(), 0);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::ApiError("HTTP 400: bad".into()).to_string(),
            "API error: HTTP 400: bad"
        );
        assert_eq!(AiError::Timeout.to_string(), "Timeout");
    }
}
