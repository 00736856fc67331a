//! The seam between a session and the hosted model service.

use async_trait::async_trait;

use crate::{GatewayError, Turn};

/// Sampling parameters a conversation is started with.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 384,
        }
    }
}

/// A started conversation. Owned by the session, interpreted by the gateway.
#[derive(Debug, Clone)]
pub struct ConversationHandle {
    id: String,
    system_instruction: String,
    config: GenerationConfig,
    history: Vec<Turn>,
}

impl ConversationHandle {
    pub fn new(system_instruction: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            system_instruction: system_instruction.into(),
            config,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Provider-side history, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Record a completed exchange. Gateways call this only after a reply arrived.
    pub fn record_exchange(&mut self, message: impl Into<String>, reply: impl Into<String>) {
        self.history.push(Turn::user(message));
        self.history.push(Turn::model(reply));
    }
}

/// A hosted chat model.
///
/// Implementations surface provider failures as `GatewayError` and must
/// leave the handle untouched when `send` fails.
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    async fn start(
        &self,
        system_instruction: &str,
        config: &GenerationConfig,
    ) -> Result<ConversationHandle, GatewayError>;

    async fn send(
        &self,
        conversation: &mut ConversationHandle,
        message: &str,
    ) -> Result<String, GatewayError>;
}
