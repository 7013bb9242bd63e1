//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ApiConfig;

/// Installs the global subscriber
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().with_target(true).json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
