pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, CredentialError, GemchatError};
pub use id::{new_correlation_id, new_id, SessionId};
pub use types::{ContextPolicy, SystemInstructionMode, DEFAULT_BASE_URL};

pub type Result<T> = std::result::Result<T, GemchatError>;
