use std::sync::Arc;

use persona_ai::{CharacterSetup, ConversationGateway};

use crate::store::SessionStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub gateway: Arc<dyn ConversationGateway>,
    /// Preamble and sampling parameters for every new conversation.
    pub setup: Arc<CharacterSetup>,
    /// Word budget reported alongside the prompt.
    pub max_prompt_words: u32,
}
