//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with default configuration
///
/// The filter is taken from `RUST_LOG` when set; otherwise everything at
/// `info` plus `debug` for the finsight crates.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,finsight_pipeline=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
