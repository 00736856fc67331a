//! Session state and the fixed framing around a student's prompt.

use crate::gateway::GenerationConfig;
use crate::{Speaker, Turn};

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No conversation yet, or cleared.
    Uninitialized,
    /// A conversation is open and accepts messages.
    Ready,
}

/// What every conversation is started with besides the student's prompt.
#[derive(Debug, Clone)]
pub struct CharacterSetup {
    /// Meta-instruction placed before the student's prompt.
    pub preamble: String,
    pub generation: GenerationConfig,
}

impl CharacterSetup {
    pub fn new(preamble: impl Into<String>, generation: GenerationConfig) -> Self {
        Self {
            preamble: preamble.into(),
            generation,
        }
    }

    /// Full system instruction for a student prompt.
    pub fn instruction_for(&self, prompt: &str) -> String {
        if self.preamble.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n{}", self.preamble, prompt)
        }
    }
}

/// Render turns as the page shows them: one `You:` / `AI:` line per turn.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| match turn.speaker {
            Speaker::User => format!("You: {}", turn.text),
            Speaker::Model => format!("AI: {}", turn.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
