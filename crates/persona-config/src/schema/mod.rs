//! Configuration schema types for Persona.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the classroom page shipped with.

mod character;
mod gemini;
mod server;
mod system;

pub use character::*;
pub use gemini::*;
pub use server::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Persona.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonaConfig {
    pub server: ServerConfig,
    pub gemini: GeminiSection,
    pub generation: GenerationSection,
    pub character: CharacterConfig,
    pub sessions: SessionsConfig,
    pub logging: LoggingConfig,
}
