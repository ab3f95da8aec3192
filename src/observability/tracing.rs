use tracing::Span;
use tracing_subscriber::{fmt, EnvFilter};
use crate::config::LoggingConfig;
use crate::types::address::Address;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = if config.json {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

pub fn trace_fetch_batch(oracle: &Address, symbols: usize) -> Span {
    tracing::info_span!(
        "fetch_batch",
        oracle = %oracle,
        symbols,
    )
}
