//! Step-by-step session construction.

use std::sync::Arc;

use gemchat_common::{ContextPolicy, SessionId, SystemInstructionMode};
use tracing::{debug, info};

use crate::token_tracker::TokenTracker;
use crate::{GenerationConfig, TextGenerationProvider, Turn};

use super::manager::ConversationSession;
use super::types::SessionError;

pub struct SessionBuilder {
    provider: Arc<dyn TextGenerationProvider>,
    model_id: String,
    system_instruction: Option<String>,
    mode: SystemInstructionMode,
    context: ContextPolicy,
    config: GenerationConfig,
}

impl SessionBuilder {
    pub fn new(provider: Arc<dyn TextGenerationProvider>, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            system_instruction: None,
            mode: SystemInstructionMode::None,
            context: ContextPolicy::Full,
            config: GenerationConfig::default(),
        }
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn mode(mut self, mode: SystemInstructionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn context_policy(mut self, context: ContextPolicy) -> Self {
        self.context = context;
        self
    }

    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply the system instruction policy and open the session.
    ///
    /// Simulated mode seeds the transcript with the instruction as a user
    /// turn without calling the provider.
    pub fn build(self) -> Result<ConversationSession, SessionError> {
        let instruction = self
            .system_instruction
            .filter(|s| !s.trim().is_empty());

        let mut transcript = Vec::new();
        let native_instruction = match (self.mode, instruction) {
            (SystemInstructionMode::None, ignored) => {
                if ignored.is_some() {
                    debug!("system instruction ignored in none mode");
                }
                None
            }
            (SystemInstructionMode::Native, Some(text)) => Some(text),
            (SystemInstructionMode::Simulated, Some(text)) => {
                transcript.push(Turn::user(text));
                None
            }
            (mode, None) => return Err(SessionError::MissingSystemInstruction(mode)),
        };

        let session = ConversationSession {
            id: SessionId::new(),
            provider: self.provider,
            model_id: self.model_id,
            mode: self.mode,
            context: self.context,
            system_instruction: native_instruction,
            preamble_len: transcript.len(),
            transcript,
            config: self.config,
            tracker: TokenTracker::new(),
            closed: false,
        };

        info!(
            session = %session.id.short(),
            provider = session.provider.name(),
            model = %session.model_id,
            mode = %session.mode,
            context = %session.context,
            "session opened"
        );
        Ok(session)
    }
}
