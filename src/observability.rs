//! Tracing subscriber setup.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG` wins over `server.log_level`. Production logs are JSON lines,
/// everything else is human-readable text.
pub fn init_tracing(server: &ServerConfig) {
    INIT.get_or_init(|| {
        let filter = env_filter(&server.log_level);
        let registry = tracing_subscriber::registry().with(filter);
        if server.is_production() {
            let _ = registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init();
        } else {
            let _ = registry.with(tracing_subscriber::fmt::layer()).try_init();
        }
    });
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
