//! ConversationSession struct, lifecycle, and accessors.

use std::sync::Arc;

use gemchat_common::{ContextPolicy, SessionId, SystemInstructionMode};
use tracing::info;

use crate::token_tracker::TokenTracker;
use crate::{GenerationConfig, GenerationRequest, TextGenerationProvider, Turn};

use super::builder::SessionBuilder;
use super::types::SessionError;

/// A conversation with one provider, owned by a single driver.
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) provider: Arc<dyn TextGenerationProvider>,
    pub(super) model_id: String,
    pub(super) mode: SystemInstructionMode,
    pub(super) context: ContextPolicy,
    /// Set only in native mode; simulated mode keeps it in the transcript.
    pub(super) system_instruction: Option<String>,
    pub(super) transcript: Vec<Turn>,
    /// Leading transcript turns that are always sent (the simulated instruction).
    pub(super) preamble_len: usize,
    pub(super) config: GenerationConfig,
    pub(super) tracker: TokenTracker,
    pub(super) closed: bool,
}

impl ConversationSession {
    pub fn builder(
        provider: Arc<dyn TextGenerationProvider>,
        model_id: impl Into<String>,
    ) -> SessionBuilder {
        SessionBuilder::new(provider, model_id)
    }

    /// Open a session with the default context policy and generation config.
    pub fn create(
        provider: Arc<dyn TextGenerationProvider>,
        model_id: impl Into<String>,
        system_instruction: Option<&str>,
        mode: SystemInstructionMode,
    ) -> Result<Self, SessionError> {
        let mut builder = Self::builder(provider, model_id).mode(mode);
        if let Some(instruction) = system_instruction {
            builder = builder.system_instruction(instruction);
        }
        builder.build()
    }

    pub(super) fn build_request(&self, pending: &Turn) -> GenerationRequest {
        let context = match self.context {
            ContextPolicy::Full => &self.transcript[..],
            ContextPolicy::Latest => &self.transcript[..self.preamble_len],
        };
        let mut contents = Vec::with_capacity(context.len() + 1);
        contents.extend_from_slice(context);
        contents.push(pending.clone());

        GenerationRequest {
            model: self.model_id.clone(),
            contents,
            system_instruction: self.system_instruction.clone(),
            config: self.config.clone(),
        }
    }

    /// Mark the session closed and let the provider drop any server-side state.
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.provider.end_session(&self.id);
        info!(
            session = %self.id.short(),
            turns = self.transcript.len(),
            tokens = self.tracker.total_tokens(),
            "session closed"
        );
    }

    /// The transcript in insertion order.
    pub fn history(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn mode(&self) -> SystemInstructionMode {
        self.mode
    }

    pub fn context_policy(&self) -> ContextPolicy {
        self.context
    }

    /// The native system instruction, if this session uses one.
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("provider", &self.provider.name())
            .field("model_id", &self.model_id)
            .field("mode", &self.mode)
            .field("context", &self.context)
            .field("turns", &self.transcript.len())
            .field("closed", &self.closed)
            .finish()
    }
}
