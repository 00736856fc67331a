//! Per-section validators.

use crate::schema::PersonaConfig;

use super::helpers::{validate_min, validate_non_blank, validate_range_f64};

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &PersonaConfig) {
    validate_non_blank(errors, "server.bind", &config.server.bind);
    validate_min(errors, "server.port", config.server.port.into(), 1);
}

pub(crate) fn validate_gemini(errors: &mut Vec<String>, config: &PersonaConfig) {
    validate_non_blank(errors, "gemini.model", &config.gemini.model);
    validate_non_blank(errors, "gemini.api_key_env", &config.gemini.api_key_env);
    validate_min(
        errors,
        "gemini.connect_timeout_secs",
        config.gemini.connect_timeout_secs,
        1,
    );
    validate_min(
        errors,
        "gemini.request_timeout_secs",
        config.gemini.request_timeout_secs,
        1,
    );
}

pub(crate) fn validate_generation(errors: &mut Vec<String>, config: &PersonaConfig) {
    let generation = &config.generation;
    validate_range_f64(
        errors,
        "generation.temperature",
        generation.temperature,
        0.0,
        2.0,
    );
    validate_range_f64(errors, "generation.top_p", generation.top_p, 0.0, 1.0);
    validate_min(errors, "generation.top_k", generation.top_k.into(), 1);
    validate_min(
        errors,
        "generation.max_output_tokens",
        generation.max_output_tokens.into(),
        1,
    );
}

pub(crate) fn validate_character(errors: &mut Vec<String>, config: &PersonaConfig) {
    validate_min(
        errors,
        "character.max_prompt_words",
        config.character.max_prompt_words.into(),
        1,
    );
}

pub(crate) fn validate_sessions(errors: &mut Vec<String>, config: &PersonaConfig) {
    validate_min(
        errors,
        "sessions.idle_ttl_secs",
        config.sessions.idle_ttl_secs,
        1,
    );
    validate_min(
        errors,
        "sessions.reap_interval_secs",
        config.sessions.reap_interval_secs,
        1,
    );
}
