use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::types::address::Address;
use crate::types::price::PriceRecord;

pub const DEFAULT_SYMBOLS: [&str; 6] = ["BTC", "DOT", "ETH", "SOL", "USDT", "USDC"];

/// What to poll: an oracle deployment and the symbols to read from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedTarget {
    pub address: Option<Address>,
    pub symbols: Vec<String>,
}

impl FeedTarget {
    pub fn new(address: Option<Address>, symbols: Option<Vec<String>>) -> Self {
        FeedTarget {
            address,
            symbols: symbols.unwrap_or_else(default_symbols),
        }
    }
}

pub fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

/// Snapshot published to feed consumers after every poll.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub prices: Vec<PriceRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeedState {
    pub fn active_feeds(&self) -> impl Iterator<Item = &PriceRecord> {
        self.prices.iter().filter(|p| p.is_live())
    }

    pub fn inactive_feeds(&self) -> impl Iterator<Item = &PriceRecord> {
        self.prices.iter().filter(|p| !p.is_live())
    }
}

impl Default for FeedState {
    fn default() -> Self {
        FeedState {
            prices: Vec::new(),
            loading: true,
            error: None,
            updated_at: None,
        }
    }
}
