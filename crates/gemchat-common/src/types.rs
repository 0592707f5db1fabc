use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generative Language REST endpoint; model name and method are appended.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Where a session's system instruction lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemInstructionMode {
    /// No system instruction.
    #[default]
    None,
    /// Dedicated field passed with every provider call.
    Native,
    /// First user-authored turn of the transcript.
    Simulated,
}

impl SystemInstructionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Native => "native",
            Self::Simulated => "simulated",
        }
    }
}

impl fmt::Display for SystemInstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemInstructionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "native" => Ok(Self::Native),
            "simulated" => Ok(Self::Simulated),
            other => Err(format!(
                "unknown system instruction mode '{other}' (expected none, native or simulated)"
            )),
        }
    }
}

/// How much of the transcript the provider sees on each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContextPolicy {
    /// Every turn so far.
    #[default]
    Full,
    /// Only the newest utterance (plus a simulated instruction, if any).
    Latest,
}

impl ContextPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "latest" => Ok(Self::Latest),
            other => Err(format!(
                "unknown context policy '{other}' (expected full or latest)"
            )),
        }
    }
}
