//! Values resolved at startup from outside the config file: the provider
//! API key and, optionally, a preamble kept in its own file.

use persona_common::ConfigError;
use tracing::info;

use crate::schema::PersonaConfig;

/// Read the provider API key from the environment variable named by
/// `gemini.api_key_env`.
pub fn resolve_api_key(config: &PersonaConfig) -> Result<String, ConfigError> {
    lookup_api_key(config, |name| std::env::var(name).ok())
}

fn lookup_api_key(
    config: &PersonaConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let name = &config.gemini.api_key_env;
    match lookup(name) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingSecret(name.clone())),
    }
}

/// The meta-instruction joined to every student prompt.
///
/// `character.preamble_file` takes precedence over the inline value.
pub fn resolve_preamble(config: &PersonaConfig) -> Result<String, ConfigError> {
    match &config.character.preamble_file {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                ConfigError::ParseError(format!(
                    "failed to read preamble file {}: {e}",
                    path.display()
                ))
            })?;
            info!(path = %path.display(), chars = text.len(), "loaded preamble file");
            Ok(text.trim_end().to_string())
        }
        None => Ok(config.character.preamble.clone()),
    }
}
