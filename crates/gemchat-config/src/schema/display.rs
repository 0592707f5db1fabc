//! Terminal output configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub user_prompt: String,
    pub model_prefix: String,
    /// Print every response part (code, execution results) with labels.
    pub show_parts: bool,
    /// Dump the transcript when the loop ends.
    pub print_history: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            user_prompt: "[User]: ".into(),
            model_prefix: "[GenAI]:".into(),
            show_parts: false,
            print_history: false,
        }
    }
}
