//! Gemini API client struct, request building, and response parsing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::debug;

use crate::{AiError, AiResponse, GenerationRequest, Part, Role, TokenUsage, Turn};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, request: &GenerationRequest) -> Value {
        let mut contents = Vec::new();
        let mut system_turn = None;

        for turn in &request.contents {
            let role = match turn.role() {
                Role::User => "user",
                Role::Model => "model",
                Role::System => {
                    // handled via systemInstruction
                    system_turn.get_or_insert(turn.content());
                    continue;
                }
            };
            contents.push(json!({
                "role": role,
                "parts": turn_parts_json(turn),
            }));
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": request.config.max_output_tokens,
                "temperature": request.config.temperature,
            }
        });

        if let Some(system) = request.system_instruction.as_deref().or(system_turn) {
            body["systemInstruction"] = json!({
                "parts": [{ "text": system }]
            });
        }

        if request.config.code_execution {
            body["tools"] = json!([{ "codeExecution": {} }]);
        }

        body
    }

    /// Parse a Gemini response.
    pub(crate) fn parse_response(&self, json: Value) -> Result<AiResponse, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let raw_parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut parts = Vec::with_capacity(raw_parts.len());
        for raw in &raw_parts {
            match part_from_json(raw)? {
                Some(part) => parts.push(part),
                None => debug!(part = %raw, "skipping unsupported Gemini part"),
            }
        }

        // Blocked or truncated candidates come back without content; an
        // empty model turn would poison every later request.
        if parts.is_empty() {
            let reason = first["finishReason"].as_str().unwrap_or("UNKNOWN");
            return Err(AiError::ApiError(format!(
                "no usable content in response (finishReason: {reason})"
            )));
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(AiResponse { parts, usage })
    }
}

/// Model turns are replayed with all their parts so the model sees its own code.
fn turn_parts_json(turn: &Turn) -> Vec<Value> {
    turn.parts().iter().map(part_to_json).collect()
}

fn part_to_json(part: &Part) -> Value {
    match part {
        Part::Text { text } => json!({ "text": text }),
        Part::ExecutableCode { language, code } => json!({
            "executableCode": { "language": language, "code": code }
        }),
        Part::CodeExecutionResult { outcome, output } => json!({
            "codeExecutionResult": { "outcome": outcome, "output": output }
        }),
        Part::InlineData { mime_type, data } => json!({
            "inlineData": { "mimeType": mime_type, "data": BASE64.encode(data) }
        }),
    }
}

fn part_from_json(raw: &Value) -> Result<Option<Part>, AiError> {
    if let Some(text) = raw["text"].as_str() {
        return Ok(Some(Part::text(text)));
    }
    if let Some(code) = raw.get("executableCode") {
        return Ok(Some(Part::ExecutableCode {
            language: code["language"].as_str().unwrap_or("").to_string(),
            code: code["code"].as_str().unwrap_or("").to_string(),
        }));
    }
    if let Some(result) = raw.get("codeExecutionResult") {
        return Ok(Some(Part::CodeExecutionResult {
            outcome: result["outcome"].as_str().unwrap_or("").to_string(),
            output: result["output"].as_str().unwrap_or("").to_string(),
        }));
    }
    if let Some(inline) = raw.get("inlineData") {
        let data = BASE64
            .decode(inline["data"].as_str().unwrap_or(""))
            .map_err(|e| AiError::ParseError(format!("invalid inlineData: {e}")))?;
        return Ok(Some(Part::InlineData {
            mime_type: inline["mimeType"]
                .as_str()
                .unwrap_or("application/octet-stream")
                .to_string(),
            data,
        }));
    }
    Ok(None)
}
