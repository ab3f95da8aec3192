pub mod cache;
pub mod poller;
pub mod state;

use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;
use crate::error::{Error, Result};
use crate::observability::metrics::{BATCH_LATENCY, CACHE_HITS, CACHE_MISSES, SYMBOL_FALLBACKS};
use crate::observability::tracing::trace_fetch_batch;
use crate::oracle::OracleReader;
use crate::types::address::Address;
use crate::types::price::{format_units, PriceRecord, PRICE_DECIMALS};
use crate::types::timestamp::format_last_updated;

pub use cache::{CacheKey, PriceCache, DEFAULT_CACHE_TTL};
pub use poller::{FeedControl, FeedPoller};
pub use state::{FeedState, FeedTarget, DEFAULT_SYMBOLS};

/// Cached, concurrent reader of oracle prices for a set of symbols.
pub struct OracleFeed {
    reader: Option<Arc<dyn OracleReader>>,
    cache: PriceCache,
    decimals: u8,
}

impl OracleFeed {
    /// `reader` is `None` when no RPC provider is configured; every fetch then
    /// fails at the batch level.
    pub fn new(reader: Option<Arc<dyn OracleReader>>, cache_ttl: Duration) -> Self {
        OracleFeed {
            reader,
            cache: PriceCache::new(cache_ttl),
            decimals: PRICE_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Latest records for `target`, served from cache while fresh.
    pub async fn fetch(&self, target: &FeedTarget) -> Result<Vec<PriceRecord>> {
        self.fetch_as_of(target, Instant::now()).await
    }

    /// Like `fetch`, but a network result is cached as captured at `started`
    /// rather than when the last RPC call returned.
    pub async fn fetch_as_of(&self, target: &FeedTarget, started: Instant) -> Result<Vec<PriceRecord>> {
        let reader = self.reader.as_ref().ok_or(Error::ProviderUnavailable)?;
        let address = target.address.ok_or(Error::OracleAddressMissing)?;
        let key = CacheKey::new(&address, &target.symbols);

        if let Some(cached) = self.cache.get(&key, &address) {
            CACHE_HITS.inc();
            tracing::debug!("Cache hit for {}", key);
            return Ok(in_request_order(cached, &target.symbols));
        }
        CACHE_MISSES.inc();

        let records = fetch_batch(Arc::clone(reader), address, &target.symbols, self.decimals)
            .instrument(trace_fetch_batch(&address, target.symbols.len()))
            .await?;

        self.cache.insert(key, address, records.clone(), started);
        Ok(records)
    }

    pub fn is_cached(&self, target: &FeedTarget) -> bool {
        target.address.is_some_and(|address| {
            self.cache.contains_fresh(&CacheKey::new(&address, &target.symbols), &address)
        })
    }

    /// Drop the cache entry so the next fetch goes to the network.
    pub fn invalidate(&self, target: &FeedTarget) {
        if let Some(address) = target.address {
            let key = CacheKey::new(&address, &target.symbols);
            if self.cache.remove(&key) {
                tracing::debug!("Invalidated cache entry {}", key);
            }
        }
    }
}

async fn fetch_batch(
    reader: Arc<dyn OracleReader>,
    address: Address,
    symbols: &[String],
    decimals: u8,
) -> Result<Vec<PriceRecord>> {
    let timer = BATCH_LATENCY.start_timer();

    let tasks: Vec<_> = symbols
        .iter()
        .map(|symbol| {
            let reader = Arc::clone(&reader);
            let symbol = symbol.clone();
            tokio::spawn(
                async move { fetch_symbol(reader.as_ref(), &address, &symbol, decimals).await }
                    .in_current_span(),
            )
        })
        .collect();

    // A task that panicked or was cancelled fails the whole batch.
    let mut records = Vec::with_capacity(tasks.len());
    for joined in join_all(tasks).await {
        records.push(joined?);
    }

    timer.observe_duration();
    tracing::info!("Fetched {} oracle feeds from {}", records.len(), address);
    Ok(records)
}

/// Per-symbol read; any failure degrades to the placeholder record.
async fn fetch_symbol(
    reader: &dyn OracleReader,
    oracle: &Address,
    symbol: &str,
    decimals: u8,
) -> PriceRecord {
    match read_symbol(reader, oracle, symbol, decimals).await {
        Ok(record) => record,
        Err(e) => {
            SYMBOL_FALLBACKS.inc();
            tracing::warn!("Falling back to placeholder for {}: {}", symbol, e);
            PriceRecord::placeholder(symbol)
        }
    }
}

async fn read_symbol(
    reader: &dyn OracleReader,
    oracle: &Address,
    symbol: &str,
    decimals: u8,
) -> Result<PriceRecord> {
    if !reader.feed_exists(oracle, symbol).await? {
        return Ok(PriceRecord::placeholder(symbol));
    }

    let (is_active, price, last_updated) = tokio::join!(
        reader.is_active(oracle, symbol),
        reader.get_price(oracle, symbol),
        reader.get_last_updated(oracle, symbol),
    );

    Ok(PriceRecord {
        symbol: symbol.to_string(),
        price: format_units(price?, decimals),
        last_updated: format_last_updated(last_updated?),
        exists: true,
        is_active: is_active?,
    })
}

fn in_request_order(cached: Vec<PriceRecord>, symbols: &[String]) -> Vec<PriceRecord> {
    let by_symbol: HashMap<&str, &PriceRecord> = cached.iter()
        .map(|r| (r.symbol.as_str(), r))
        .collect();

    symbols
        .iter()
        .map(|s| {
            by_symbol
                .get(s.as_str())
                .map(|r| (*r).clone())
                .unwrap_or_else(|| PriceRecord::placeholder(s))
        })
        .collect()
}
