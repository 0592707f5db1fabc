//! The send path: validate, call the provider, record both turns.

use tracing::{debug, warn};

use crate::Turn;

use super::manager::ConversationSession;
use super::types::{is_termination_token, RollbackGuard, SessionError};

impl ConversationSession {
    /// Send one utterance and return the model's reply.
    ///
    /// On success the transcript grows by exactly two turns. Empty input,
    /// termination tokens and closed sessions fail before anything is
    /// recorded or sent. A provider failure is returned unchanged and the
    /// user turn is rolled back; nothing is retried.
    pub async fn send(&mut self, utterance: impl Into<String>) -> Result<Turn, SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        let utterance = utterance.into();
        if utterance.trim().is_empty() || is_termination_token(&utterance) {
            return Err(SessionError::EmptyInput);
        }

        let user_turn = Turn::user(utterance);
        let request = self.build_request(&user_turn);
        let guard = RollbackGuard::push(&mut self.transcript, user_turn);

        debug!(
            session = %self.id.short(),
            context_turns = request.contents.len(),
            "sending turn"
        );

        let response = match self.provider.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session = %self.id.short(), "provider call failed, turn rolled back: {e}");
                return Err(SessionError::Provider(e));
            }
        };

        self.tracker.record(&response.usage);
        let reply = Turn::model(response.parts);
        guard.commit(reply.clone());
        Ok(reply)
    }
}
