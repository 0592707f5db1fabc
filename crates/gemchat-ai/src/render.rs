//! Turning reply parts into labelled, printable blocks.
//!
//! The session never interprets parts; callers render each one here and
//! decide how to print it.

use std::fmt;

use crate::turn::{Part, Turn};

pub const CODE_LABEL: &str = "Code";
pub const EXECUTION_RESULT_LABEL: &str = "Execution Result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Text,
    Code,
    ExecutionResult,
    Binary,
}

/// A single printable block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPart {
    pub kind: PartKind,
    pub label: Option<&'static str>,
    pub body: String,
}

impl RenderedPart {
    /// Binary payloads only get a placeholder in a text terminal.
    pub fn is_renderable(&self) -> bool {
        self.kind != PartKind::Binary
    }
}

impl fmt::Display for RenderedPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(label) => write!(f, "{label}:\n{}", self.body),
            None => f.write_str(&self.body),
        }
    }
}

pub fn render_part(part: &Part) -> RenderedPart {
    match part {
        Part::Text { text } => RenderedPart {
            kind: PartKind::Text,
            label: None,
            body: text.clone(),
        },
        Part::ExecutableCode { code, .. } => RenderedPart {
            kind: PartKind::Code,
            label: Some(CODE_LABEL),
            body: code.clone(),
        },
        Part::CodeExecutionResult { output, .. } => RenderedPart {
            kind: PartKind::ExecutionResult,
            label: Some(EXECUTION_RESULT_LABEL),
            body: output.clone(),
        },
        Part::InlineData { mime_type, .. } => RenderedPart {
            kind: PartKind::Binary,
            label: None,
            body: format!("[{mime_type} data cannot be displayed in console]"),
        },
    }
}

/// Render every part of `turn`, in order.
pub fn render_turn(turn: &Turn) -> Vec<RenderedPart> {
    turn.parts().iter().map(render_part).collect()
}
