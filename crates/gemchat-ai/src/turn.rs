//! Transcript entries and the parts a reply can be made of.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One piece of a provider reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text {
        text: String,
    },
    ExecutableCode {
        language: String,
        code: String,
    },
    CodeExecutionResult {
        outcome: String,
        output: String,
    },
    InlineData {
        mime_type: String,
        data: Vec<u8>,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Structured payload kept when a reply is more than plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub parts: Vec<Part>,
}

/// One message of a conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    metadata: Option<TurnMetadata>,
    created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, content: String, metadata: Option<TurnMetadata>) -> Self {
        Self {
            role,
            content,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), None)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content.into(), None)
    }

    /// Build a model turn from reply parts.
    ///
    /// `content` is the text parts joined by a space. The full part list is
    /// kept as metadata only when something other than text came back.
    pub fn model(parts: Vec<Part>) -> Self {
        let content = parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join(" ");
        let metadata = parts
            .iter()
            .any(|p| p.as_text().is_none())
            .then_some(TurnMetadata { parts });
        Self::new(Role::Model, content, metadata)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> Option<&TurnMetadata> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Ordered sub-parts of this turn; a plain turn is a single text part.
    pub fn parts(&self) -> Cow<'_, [Part]> {
        match &self.metadata {
            Some(meta) => Cow::Borrowed(&meta.parts),
            None => Cow::Owned(vec![Part::text(self.content.clone())]),
        }
    }
}
