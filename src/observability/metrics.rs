use lazy_static::lazy_static;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Cache metrics
    pub static ref CACHE_HITS: IntCounter = IntCounter::new(
        "oracle_cache_hits_total",
        "Feed fetches served from the price cache"
    ).unwrap();

    pub static ref CACHE_MISSES: IntCounter = IntCounter::new(
        "oracle_cache_misses_total",
        "Feed fetches that went to the network"
    ).unwrap();

    // RPC metrics
    pub static ref RPC_CALLS: IntCounter = IntCounter::new(
        "oracle_rpc_calls_total",
        "JSON-RPC requests issued"
    ).unwrap();

    pub static ref RPC_ERRORS: IntCounter = IntCounter::new(
        "oracle_rpc_errors_total",
        "JSON-RPC requests that failed"
    ).unwrap();

    // Feed metrics
    pub static ref SYMBOL_FALLBACKS: IntCounter = IntCounter::new(
        "oracle_symbol_fallbacks_total",
        "Symbols replaced by a placeholder after a failed read"
    ).unwrap();

    pub static ref BATCH_FAILURES: IntCounter = IntCounter::new(
        "oracle_batch_failures_total",
        "Poll cycles that failed as a whole"
    ).unwrap();

    pub static ref BATCH_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "oracle_batch_latency_seconds",
            "Wall time to read every symbol of one batch"
        ).buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    ).unwrap();
}

static REGISTER: Once = Once::new();

/// Register all collectors with `REGISTRY`. Safe to call more than once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        REGISTRY.register(Box::new(CACHE_HITS.clone())).unwrap();
        REGISTRY.register(Box::new(CACHE_MISSES.clone())).unwrap();
        REGISTRY.register(Box::new(RPC_CALLS.clone())).unwrap();
        REGISTRY.register(Box::new(RPC_ERRORS.clone())).unwrap();
        REGISTRY.register(Box::new(SYMBOL_FALLBACKS.clone())).unwrap();
        REGISTRY.register(Box::new(BATCH_FAILURES.clone())).unwrap();
        REGISTRY.register(Box::new(BATCH_LATENCY.clone())).unwrap();
    });
}

/// Prometheus text exposition of `REGISTRY`.
pub fn gather_text() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
