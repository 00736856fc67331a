//! Conversation engine for Persona.
//!
//! Provides:
//! - the `ConversationGateway` seam to the hosted model provider
//! - a Gemini implementation of that gateway
//! - the per-client `Session` lifecycle (prompt, submit, clear)

pub mod gateway;
pub mod gemini;
pub mod session;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use gateway::{ConversationGateway, ConversationHandle, GenerationConfig};
pub use gemini::{GeminiConfig, GeminiGateway};
pub use session::{render_transcript, CharacterSetup, Session, SessionState};

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

/// One line of a conversation. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }
}

/// Coarse classification of gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or transport failure; the provider was not reached or did not answer.
    GatewayUnavailable,
    /// The provider answered but refused: quota, invalid instruction, content policy.
    ProviderRejected,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
    #[error("provider rejected request: {0}")]
    Rejected(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Unavailable(_) => ErrorKind::GatewayUnavailable,
            GatewayError::Rejected(_) => ErrorKind::ProviderRejected,
        }
    }
}
