//! Session and credential section validation.

use gemchat_common::SystemInstructionMode;

use crate::schema::GemchatConfig;

use super::helpers::validate_not_blank;

/// Native and simulated modes need an instruction to carry.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &GemchatConfig) {
    let session = &config.session;
    let has_instruction = session
        .system_instruction
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());

    if session.mode != SystemInstructionMode::None && !has_instruction {
        errors.push(format!(
            "session.mode = {} requires session.system_instruction",
            session.mode
        ));
    }
}

pub(crate) fn validate_credentials(errors: &mut Vec<String>, config: &GemchatConfig) {
    validate_not_blank(
        errors,
        "credentials.provider_name",
        &config.credentials.provider_name,
    );
}
