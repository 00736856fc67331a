//! Gemini gateway struct, request building, and response parsing.

use tracing::debug;

use crate::gateway::ConversationHandle;
use crate::{GatewayError, Speaker};

use super::config::GeminiConfig;

/// Gemini conversation gateway.
pub struct GeminiGateway {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Build the JSON request body for one `send`: the handle's history
/// followed by the new user message.
pub(crate) fn build_request_body(
    conversation: &ConversationHandle,
    message: &str,
) -> serde_json::Value {
    let mut contents: Vec<serde_json::Value> = conversation
        .history()
        .iter()
        .map(|turn| {
            let role = match turn.speaker {
                Speaker::User => "user",
                Speaker::Model => "model",
            };
            serde_json::json!({
                "role": role,
                "parts": [{ "text": turn.text }]
            })
        })
        .collect();

    contents.push(serde_json::json!({
        "role": "user",
        "parts": [{ "text": message }]
    }));

    let config = conversation.config();
    serde_json::json!({
        "systemInstruction": {
            "parts": [{ "text": conversation.system_instruction() }]
        },
        "contents": contents,
        "generationConfig": {
            "temperature": config.temperature,
            "topP": config.top_p,
            "topK": config.top_k,
            "maxOutputTokens": config.max_output_tokens,
            "responseMimeType": "text/plain",
        }
    })
}

/// Extract the reply text from a `generateContent` response.
///
/// Blocked prompts and candidates withheld by a safety filter are
/// provider rejections, not empty replies.
pub(crate) fn parse_reply(json: &serde_json::Value) -> Result<String, GatewayError> {
    if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
        return Err(GatewayError::Rejected(format!("prompt blocked: {reason}")));
    }

    let first = json["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| GatewayError::Rejected("no candidates in response".to_string()))?;

    let text: String = first["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = first["finishReason"].as_str().unwrap_or("UNKNOWN");
        return Err(GatewayError::Rejected(format!(
            "reply withheld by provider (finish reason: {reason})"
        )));
    }

    if let Some(meta) = json.get("usageMetadata") {
        debug!(
            input_tokens = meta["promptTokenCount"].as_u64().unwrap_or(0),
            output_tokens = meta["candidatesTokenCount"].as_u64().unwrap_or(0),
            "Gemini usage"
        );
    }

    Ok(text)
}

/// Classify a non-success HTTP status. Quota and client errors are
/// rejections; server errors mean the provider is unavailable.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    let message = error_message(body);
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        GatewayError::Rejected(format!("quota exceeded (HTTP {status}): {message}"))
    } else if status.is_server_error() {
        GatewayError::Unavailable(format!("HTTP {status}: {message}"))
    } else {
        GatewayError::Rejected(format!("HTTP {status}: {message}"))
    }
}

/// Pull the provider's message out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
