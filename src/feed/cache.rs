use dashmap::DashMap;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use crate::types::address::Address;
use crate::types::price::PriceRecord;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Oracle address plus the symbol list, sorted so request order does not matter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    address: Address,
    symbols: Vec<String>,
}

impl CacheKey {
    pub fn new(address: &Address, symbols: &[String]) -> Self {
        let mut symbols = symbols.to_vec();
        symbols.sort();
        CacheKey {
            address: *address,
            symbols,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.address, self.symbols.join(","))
    }
}

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub data: Vec<PriceRecord>,
    pub captured_at: Instant,
    pub oracle_address: Address,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.captured_at) >= ttl
    }

    fn is_valid(&self, oracle_address: &Address, ttl: Duration, now: Instant) -> bool {
        self.oracle_address == *oracle_address && !self.is_expired(ttl, now)
    }
}

pub struct PriceCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        PriceCache {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh records for `key`, if any. Expired entries are evicted.
    pub fn get(&self, key: &CacheKey, oracle_address: &Address) -> Option<Vec<PriceRecord>> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if entry.is_valid(oracle_address, self.ttl, now) => {
                return Some(entry.data.clone());
            }
            Some(_) => {}
            None => return None,
        }

        // Read guard is released above; evicting while holding it would deadlock.
        self.entries
            .remove_if(key, |_, entry| entry.is_expired(self.ttl, now));
        None
    }

    pub fn contains_fresh(&self, key: &CacheKey, oracle_address: &Address) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_valid(oracle_address, self.ttl, now))
    }

    /// Store `data` as captured at `captured_at`, the moment its batch started.
    ///
    /// Expired entries for other keys are swept first so targets that are no
    /// longer polled do not accumulate.
    pub fn insert(&self, key: CacheKey, oracle_address: Address, data: Vec<PriceRecord>, captured_at: Instant) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(self.ttl, now));

        self.entries.insert(key, CacheEntry {
            data,
            captured_at,
            oracle_address,
        });
    }

    pub fn remove(&self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
