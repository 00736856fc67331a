//! ConversationGateway implementation for GeminiGateway.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::gateway::{ConversationGateway, ConversationHandle, GenerationConfig};
use crate::GatewayError;

use super::client::{build_request_body, parse_reply, status_error, GeminiGateway};

#[async_trait]
impl ConversationGateway for GeminiGateway {
    async fn start(
        &self,
        system_instruction: &str,
        config: &GenerationConfig,
    ) -> Result<ConversationHandle, GatewayError> {
        if system_instruction.trim().is_empty() {
            return Err(GatewayError::Rejected(
                "system instruction must not be empty".into(),
            ));
        }

        let handle = ConversationHandle::new(system_instruction, config.clone());
        debug!(
            model = %self.config.model,
            conversation = %handle.id(),
            instruction_chars = system_instruction.len(),
            "Gemini conversation started"
        );
        Ok(handle)
    }

    async fn send(
        &self,
        conversation: &mut ConversationHandle,
        message: &str,
    ) -> Result<String, GatewayError> {
        let body = build_request_body(conversation, message);
        let url = self.api_url();

        debug!(
            model = %self.config.model,
            conversation = %conversation.id(),
            history = conversation.history().len(),
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
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API error");
            return Err(status_error(status, &text));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Rejected(format!("malformed response: {e}")))?;

        let reply = parse_reply(&json)?;
        conversation.record_exchange(message, reply.clone());
        Ok(reply)
    }
}
