//! Session struct and its three operations.

use tracing::{debug, info};

use crate::gateway::{ConversationGateway, ConversationHandle};
use crate::{GatewayError, Turn};

use super::types::{CharacterSetup, SessionState};

/// One client's character chat.
///
/// `conversation` is `Some` exactly when `system_prompt` is non-empty and
/// has been used to start a conversation. Changing the prompt discards the
/// conversation and transcript together.
#[derive(Debug, Default)]
pub struct Session {
    system_prompt: String,
    conversation: Option<ConversationHandle>,
    transcript: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a character prompt.
    ///
    /// Starts a new conversation when `text` is non-blank and either differs
    /// from the current prompt or no conversation is open. Returns whether a
    /// conversation was started. On gateway failure nothing changes.
    pub async fn set_prompt(
        &mut self,
        gateway: &dyn ConversationGateway,
        setup: &CharacterSetup,
        text: &str,
    ) -> Result<bool, GatewayError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        if text == self.system_prompt && self.conversation.is_some() {
            return Ok(false);
        }

        let instruction = setup.instruction_for(text);
        let conversation = gateway.start(&instruction, &setup.generation).await?;

        info!(
            conversation = %conversation.id(),
            prompt_chars = text.len(),
            discarded_turns = self.transcript.len(),
            "Character prompt installed"
        );

        self.system_prompt = text.to_string();
        self.conversation = Some(conversation);
        self.transcript.clear();
        Ok(true)
    }

    /// Send a message in character and record the exchange.
    ///
    /// Returns `None` without contacting the gateway when the message is
    /// blank or no conversation is open. On gateway failure the transcript
    /// is left as it was.
    pub async fn submit(
        &mut self,
        gateway: &dyn ConversationGateway,
        message: &str,
    ) -> Result<Option<String>, GatewayError> {
        if message.trim().is_empty() {
            return Ok(None);
        }
        let Some(conversation) = self.conversation.as_mut() else {
            debug!("Message ignored: no character prompt set");
            return Ok(None);
        };

        let reply = gateway.send(conversation, message).await?;

        self.transcript.push(Turn::user(message));
        self.transcript.push(Turn::model(reply.clone()));
        debug!(turns = self.transcript.len(), "Exchange recorded");
        Ok(Some(reply))
    }

    /// Forget the prompt, conversation, and transcript.
    pub fn clear(&mut self) {
        self.system_prompt.clear();
        self.conversation = None;
        self.transcript.clear();
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn conversation(&self) -> Option<&ConversationHandle> {
        self.conversation.as_ref()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        if self.conversation.is_some() {
            SessionState::Ready
        } else {
            SessionState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }
}
