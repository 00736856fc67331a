//! Google Gemini conversation gateway.
//!
//! Implements `ConversationGateway` for Gemini models via the
//! Generative Language API. Conversations are kept client-side: every
//! `send` replays the handle's history together with its system
//! instruction and generation config.

mod api;
mod client;
mod config;

pub use client::GeminiGateway;
pub use config::GeminiConfig;
