//! Model provider settings: which Gemini model, how to reach it, and
//! the sampling parameters every conversation starts with.

use serde::{Deserialize, Serialize};

/// Gemini endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

/// Sampling parameters passed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Valid range: 0.0-1.0.
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 384,
        }
    }
}
