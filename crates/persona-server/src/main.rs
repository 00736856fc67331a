//! persona: classroom character chat server.
//!
//! Students define a character in a prompt; the server opens a Gemini
//! conversation framed by a fixed preamble and relays messages for one
//! session per browser tab. Sessions live in memory only and are reaped
//! once idle.

mod cli;
mod error;
mod logging;
mod page;
mod routes;
mod state;
mod store;

use std::sync::Arc;
use std::time::Duration;

use persona_ai::{CharacterSetup, GeminiConfig, GeminiGateway, GenerationConfig};
use persona_common::PersonaError;
use persona_config::PersonaConfig;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::store::SessionStore;

#[tokio::main]
async fn main() -> persona_common::Result<()> {
    let args = cli::parse();

    // Log config loading at the CLI level; the file's level applies after.
    let logging = logging::Logging::init(args.log_level.as_deref().unwrap_or("info"));

    let mut config = persona_config::load_config(args.config.as_deref())?;
    if args.log_level.is_none() {
        logging.set_level(config.logging.level.as_str());
    }

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.print_config {
        println!("{}", persona_config::config_to_json(&config));
        return Ok(());
    }

    let api_key = persona_config::resolve_api_key(&config)?;
    let preamble = persona_config::resolve_preamble(&config)?;

    let gateway = GeminiGateway::new(gemini_config(&config, api_key))
        .map_err(|e| PersonaError::Gateway(e.to_string()))?;
    tracing::info!(model = %config.gemini.model, "Gemini gateway ready");

    let state = AppState {
        store: SessionStore::new(),
        gateway: Arc::new(gateway),
        setup: Arc::new(CharacterSetup::new(preamble, generation_config(&config))),
        max_prompt_words: config.character.max_prompt_words,
    };

    // Spawn idle session reaper.
    let reaper_store = state.store.clone();
    let ttl = Duration::from_secs(config.sessions.idle_ttl_secs);
    let interval = Duration::from_secs(config.sessions.reap_interval_secs);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let reaped = reaper_store.reap_stale(ttl).await;
            let count = reaper_store.count().await;
            tracing::debug!(reaped, sessions = count, "Reaper tick");
        }
    });

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = config.server.address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("persona listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn gemini_config(config: &PersonaConfig, api_key: String) -> GeminiConfig {
    GeminiConfig::new(api_key)
        .with_model(&config.gemini.model)
        .with_timeouts(
            Duration::from_secs(config.gemini.connect_timeout_secs),
            Duration::from_secs(config.gemini.request_timeout_secs),
        )
}

fn generation_config(config: &PersonaConfig) -> GenerationConfig {
    GenerationConfig {
        temperature: config.generation.temperature,
        top_p: config.generation.top_p,
        top_k: config.generation.top_k,
        max_output_tokens: config.generation.max_output_tokens,
    }
}
