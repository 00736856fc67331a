//! HTTP listener and session housekeeping settings.

use serde::{Deserialize, Serialize};

/// Where the chat page is served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8501,
        }
    }
}

impl ServerConfig {
    /// `bind:port` string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Lifetime of idle browser sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    /// Sessions with no activity for this many seconds are dropped.
    pub idle_ttl_secs: u64,
    /// How often the reaper scans for idle sessions.
    pub reap_interval_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: 3600,
            reap_interval_secs: 60,
        }
    }
}
