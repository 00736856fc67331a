use std::path::PathBuf;

use clap::Parser;

/// Persona: classroom character chat backed by a hosted Gemini model.
#[derive(Parser, Debug)]
#[command(name = "persona", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(short, long, env = "PERSONA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to (overrides `server.bind`).
    #[arg(short, long, env = "PERSONA_BIND")]
    pub bind: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(short, long, env = "PERSONA_PORT")]
    pub port: Option<u16>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
