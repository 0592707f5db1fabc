//! Conversation session management.
//!
//! A `ConversationSession` owns the transcript, applies one system
//! instruction policy for its whole life, and mediates every exchange
//! with the injected provider.

mod builder;
mod chat;
mod manager;
mod types;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use manager::ConversationSession;
pub use types::{is_termination_token, SessionError, TERMINATION_TOKENS};
