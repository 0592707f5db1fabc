//! TextGenerationProvider implementation for GeminiClient.

use async_trait::async_trait;
use gemchat_common::new_correlation_id;
use tracing::debug;

use crate::{AiError, AiResponse, GenerationRequest, TextGenerationProvider};

use super::client::GeminiClient;

#[async_trait]
impl TextGenerationProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(request);
        let url = self.api_url(&request.model);
        let request_id = new_correlation_id();

        debug!(
            model = %request.model,
            request_id = %request_id,
            turns = request.contents.len(),
            code_execution = request.config.code_execution,
            "Gemini API request"
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let parsed = self.parse_response(json)?;
        debug!(
            request_id = %request_id,
            parts = parsed.parts.len(),
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Gemini API response"
        );
        Ok(parsed)
    }
}

fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}
