//! Persona configuration system.
//!
//! Provides TOML-based configuration for the character chat server:
//! listen address, Gemini model and generation parameters, the fixed
//! preamble joined to every student prompt, and session housekeeping.
//! All config sections use sensible defaults so partial configs work
//! out of the box.
//!
//! The provider API key is never stored in the file. It is read from the
//! environment variable named by `gemini.api_key_env` at startup.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use persona_config::{load_config, resolve_api_key};
//!
//! let config = load_config(None).expect("failed to load config");
//! let key = resolve_api_key(&config).expect("GEMINI_API_KEY not set");
//! # let _ = key;
//! ```

pub mod schema;
pub mod secrets;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    CharacterConfig, GeminiSection, GenerationSection, LogLevel, LoggingConfig, PersonaConfig,
    ServerConfig, SessionsConfig, CONFIG_SCHEMA_VERSION, DEFAULT_PREAMBLE,
};
pub use secrets::{resolve_api_key, resolve_preamble};

use std::path::Path;

use persona_common::ConfigError;

/// Load config from an explicit path, or from the platform default path.
///
/// An explicit path must exist. The default path is created from the
/// commented template when missing. The result is validated either way.
pub fn load_config(path: Option<&Path>) -> Result<PersonaConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PersonaConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = PersonaConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"server\""));
        assert!(json.contains("\"gemini\""));
        assert!(json.contains("\"generation\""));
        assert!(json.contains("\"character\""));
        assert!(json.contains("\"sessions\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_to_json_reflects_overrides() {
        let mut config = PersonaConfig::default();
        config.server.port = 9000;
        config.gemini.model = "gemini-1.5-pro".into();

        let parsed: serde_json::Value = serde_json::from_str(&config_to_json(&config)).unwrap();
        assert_eq!(parsed["server"]["port"], 9000);
        assert_eq!(parsed["gemini"]["model"], "gemini-1.5-pro");
        assert!(parsed["gemini"].get("api_key").is_none());
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn explicit_missing_path_is_file_not_found() {
        let err = load_config(Some(Path::new("/tmp/nonexistent_persona_config.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn explicit_path_with_invalid_values_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\ntop_k = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("generation.top_k"));
    }

    #[test]
    fn explicit_path_loads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.gemini.model, "gemini-2.0-flash-exp");
    }
}
