//! Session errors, input checks, and the transcript rollback guard.

use gemchat_common::SystemInstructionMode;

use crate::{AiError, Turn};

/// Inputs that end a chat loop. Matched exactly and case-sensitively.
pub const TERMINATION_TOKENS: [&str; 2] = ["exit", "quit"];

pub fn is_termination_token(input: &str) -> bool {
    TERMINATION_TOKENS.contains(&input)
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Empty utterance or a termination token; nothing was sent.
    #[error("empty input")]
    EmptyInput,
    #[error("session is closed")]
    Closed,
    #[error("{0} mode needs a system instruction")]
    MissingSystemInstruction(SystemInstructionMode),
    #[error(transparent)]
    Provider(#[from] AiError),
}

/// Pops turns appended during an exchange unless the exchange commits.
///
/// Covers both provider errors and a `send` future dropped mid-call, so the
/// transcript never ends with an unanswered user turn.
pub(crate) struct RollbackGuard<'a> {
    transcript: &'a mut Vec<Turn>,
    len_before: usize,
    committed: bool,
}

impl<'a> RollbackGuard<'a> {
    /// Push `turn` and arm the guard.
    pub(crate) fn push(transcript: &'a mut Vec<Turn>, turn: Turn) -> Self {
        let len_before = transcript.len();
        transcript.push(turn);
        Self {
            transcript,
            len_before,
            committed: false,
        }
    }

    pub(crate) fn commit(mut self, reply: Turn) {
        self.transcript.push(reply);
        self.committed = true;
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.transcript.truncate(self.len_before);
        }
    }
}
