//! Conversation behaviour: system instruction, context and tools.

use gemchat_common::{ContextPolicy, SystemInstructionMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: SystemInstructionMode,
    /// Required when `mode` is `native` or `simulated`.
    pub system_instruction: Option<String>,
    pub context: ContextPolicy,
    /// Let the model run code server-side.
    pub code_execution: bool,
}
