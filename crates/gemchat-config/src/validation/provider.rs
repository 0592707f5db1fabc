//! Provider section validation (model, endpoint, sampling, timeouts).

use crate::schema::GemchatConfig;

use super::helpers::{validate_not_blank, validate_range, validate_range_f64};

pub(crate) fn validate_provider(errors: &mut Vec<String>, config: &GemchatConfig) {
    let provider = &config.provider;
    validate_not_blank(errors, "provider.model", &provider.model);
    if !provider.base_url.starts_with("http://") && !provider.base_url.starts_with("https://") {
        errors.push(format!(
            "provider.base_url = {:?} must start with http:// or https://",
            provider.base_url
        ));
    }
    validate_range(
        errors,
        "provider.max_output_tokens",
        provider.max_output_tokens,
        1,
        u32::MAX,
    );
    validate_range_f64(errors, "provider.temperature", provider.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "provider.connect_timeout_secs",
        provider.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "provider.request_timeout_secs",
        provider.request_timeout_secs,
        1,
        3600,
    );
}
