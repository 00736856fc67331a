//! Per-client conversation session.
//!
//! A `Session` holds the student's character prompt, the conversation
//! started from it, and the transcript shown on the page. Every operation
//! takes the gateway explicitly, so a session is a plain value that can be
//! stored per client and tested without a server.

mod lifecycle;
mod types;


pub use lifecycle::Session;
pub use types::{render_transcript, CharacterSetup, SessionState};
