//! Full configuration validation.
//!
//! Each section has its own checks; this orchestrator runs them all and
//! collects every problem into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::PersonaConfig;
use persona_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PersonaConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_server(&mut errors, config);
    sections::validate_gemini(&mut errors, config);
    sections::validate_generation(&mut errors, config);
    sections::validate_character(&mut errors, config);
    sections::validate_sessions(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
