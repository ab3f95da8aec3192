// Shared fixtures for the integration tests: an in-memory oracle that counts
// every contract read it serves.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use oracle_watch::error::{Error, Result};
use oracle_watch::feed::{FeedTarget, OracleFeed};
use oracle_watch::oracle::OracleReader;
use oracle_watch::types::{parse_address, Address, U256};

pub const BTC_PRICE: u128 = 6_543_210_000_000; // 65432.1
pub const ETH_PRICE: u128 = 312_550_000_000; // 3125.5
pub const UPDATED_AT: u64 = 1_700_000_000;

#[derive(Clone, Copy)]
pub struct MockFeed {
    pub active: bool,
    pub price: u128,
    pub updated: u64,
}

#[derive(Default)]
pub struct MockOracle {
    feeds: Mutex<HashMap<String, MockFeed>>,
    failing: Mutex<HashSet<String>>,
    failing_price: Mutex<HashSet<String>>,
    panicking: Mutex<HashSet<String>>,
    latency: Mutex<Duration>,
    calls: AtomicUsize,
}

impl MockOracle {
    /// BTC and ETH live, DOT registered but inactive.
    pub fn standard() -> Arc<Self> {
        let oracle = MockOracle::default();
        oracle.set_feed("BTC", MockFeed { active: true, price: BTC_PRICE, updated: UPDATED_AT });
        oracle.set_feed("ETH", MockFeed { active: true, price: ETH_PRICE, updated: UPDATED_AT });
        oracle.set_feed("DOT", MockFeed { active: false, price: 450_000_000, updated: UPDATED_AT });
        Arc::new(oracle)
    }

    pub fn set_feed(&self, symbol: &str, feed: MockFeed) {
        self.feeds.lock().unwrap().insert(symbol.to_string(), feed);
    }

    pub fn set_price(&self, symbol: &str, price: u128) {
        if let Some(feed) = self.feeds.lock().unwrap().get_mut(symbol) {
            feed.price = price;
        }
    }

    pub fn fail(&self, symbol: &str) {
        self.failing.lock().unwrap().insert(symbol.to_string());
    }

    pub fn fail_price(&self, symbol: &str) {
        self.failing_price.lock().unwrap().insert(symbol.to_string());
    }

    pub fn panic_on(&self, symbol: &str) {
        self.panicking.lock().unwrap().insert(symbol.to_string());
    }

    /// Every read waits this long before answering.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn delay(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn feed(&self, symbol: &str) -> Result<MockFeed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking.lock().unwrap().contains(symbol) {
            panic!("mock oracle panic for {}", symbol);
        }
        if self.failing.lock().unwrap().contains(symbol) {
            return Err(Error::Transport(format!("connection reset reading {}", symbol)));
        }
        self.feeds
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| Error::Rpc { code: 3, message: "execution reverted: no feed".to_string() })
    }
}

#[async_trait]
impl OracleReader for MockOracle {
    async fn feed_exists(&self, _oracle: &Address, symbol: &str) -> Result<bool> {
        self.delay().await;
        match self.feed(symbol) {
            Ok(_) => Ok(true),
            Err(Error::Rpc { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn is_active(&self, _oracle: &Address, symbol: &str) -> Result<bool> {
        self.delay().await;
        Ok(self.feed(symbol)?.active)
    }

    async fn get_price(&self, _oracle: &Address, symbol: &str) -> Result<U256> {
        self.delay().await;
        let feed = self.feed(symbol)?;
        if self.failing_price.lock().unwrap().contains(symbol) {
            return Err(Error::AbiDecode("short return data".to_string()));
        }
        Ok(U256::from(feed.price))
    }

    async fn get_last_updated(&self, _oracle: &Address, symbol: &str) -> Result<u64> {
        self.delay().await;
        Ok(self.feed(symbol)?.updated)
    }
}

pub fn oracle_address() -> Address {
    parse_address("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap()
}

pub fn other_address() -> Address {
    parse_address("0xe7f1725e7734ce288f8367e1bb143e90bb3f0512").unwrap()
}

pub fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn target(list: &[&str]) -> FeedTarget {
    FeedTarget::new(Some(oracle_address()), Some(symbols(list)))
}

pub fn feed_with(oracle: &Arc<MockOracle>) -> OracleFeed {
    let reader: Arc<dyn OracleReader> = oracle.clone();
    OracleFeed::new(Some(reader), Duration::from_secs(30))
}
