//! Tracing setup. The subscriber is installed before the config is read so
//! config loading is logged; the level from the config file is applied
//! afterwards through a reload handle. Output goes to stderr so
//! `--print-config` keeps stdout clean.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

pub struct Logging {
    handle: reload::Handle<EnvFilter, Registry>,
    /// `RUST_LOG` was set and takes precedence over any later level.
    from_env: bool,
}

impl Logging {
    /// Install the global subscriber at `level`, unless `RUST_LOG` is set.
    pub fn init(level: &str) -> Self {
        let (filter, from_env) = match EnvFilter::try_from_default_env() {
            Ok(filter) => (filter, true),
            Err(_) => (EnvFilter::new(directives(level)), false),
        };
        let (layer, handle) = reload::Layer::new(filter);
        tracing_subscriber::registry()
            .with(layer)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        Self { handle, from_env }
    }

    /// Switch to `level` unless `RUST_LOG` pinned the filter.
    pub fn set_level(&self, level: &str) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.handle.reload(EnvFilter::new(directives(level))) {
            tracing::warn!(error = %e, "failed to apply log level");
        }
    }
}

/// Filter directives scoping `level` to this workspace and the HTTP layer.
pub fn directives(level: &str) -> String {
    format!(
        "persona={level},persona_server={level},persona_ai={level},persona_config={level},tower_http={level}"
    )
}
