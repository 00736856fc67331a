//! In-memory gateway for tests: records every call and replays scripted outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::gateway::{ConversationGateway, ConversationHandle, GenerationConfig};
use crate::GatewayError;

/// A call observed by `ScriptedGateway`.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Start { system_instruction: String },
    Send { conversation: String, message: String },
}

/// Gateway double. Replies come from the queue, or echo the message when
/// the queue is empty.
#[derive(Default)]
pub struct ScriptedGateway {
    calls: Mutex<Vec<GatewayCall>>,
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    start_failure: Mutex<Option<GatewayError>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Make the next `start` fail with `error`.
    pub fn fail_next_start(&self, error: GatewayError) {
        *self.start_failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn start_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, GatewayCall::Start { .. }))
            .count()
    }

    pub fn send_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, GatewayCall::Send { .. }))
            .count()
    }
}

#[async_trait]
impl ConversationGateway for ScriptedGateway {
    async fn start(
        &self,
        system_instruction: &str,
        config: &GenerationConfig,
    ) -> Result<ConversationHandle, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Start {
            system_instruction: system_instruction.to_string(),
        });
        if let Some(error) = self.start_failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(ConversationHandle::new(system_instruction, config.clone()))
    }

    async fn send(
        &self,
        conversation: &mut ConversationHandle,
        message: &str,
    ) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Send {
            conversation: conversation.id().to_string(),
            message: message.to_string(),
        });
        let scripted = self.replies.lock().unwrap().pop_front();
        let reply = scripted.unwrap_or_else(|| Ok(format!("reply to: {message}")))?;
        conversation.record_exchange(message, reply.clone());
        Ok(reply)
    }
}
