//! Configuration schema types for gemchat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod credentials;
mod display;
mod logging;
mod provider;
mod session;

pub use credentials::*;
pub use display::*;
pub use logging::*;
pub use provider::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GemchatConfig {
    pub provider: ProviderConfig,
    pub session: SessionConfig,
    pub credentials: CredentialsConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}
