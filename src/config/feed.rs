use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::error::Result;
use crate::feed::state::default_symbols;
use crate::types::address::{parse_address, Address};
use crate::types::price::PRICE_DECIMALS;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    pub address: Option<String>,
    /// Compiler artifact or bare ABI; the built-in oracle ABI is used when unset.
    pub abi_path: Option<String>,
    pub decimals: u8,
}

impl OracleConfig {
    /// Parsed oracle address. Empty strings count as unset.
    pub fn address(&self) -> Result<Option<Address>> {
        match self.address.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_address(s).map(Some),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            address: None,
            abi_path: None,
            decimals: PRICE_DECIMALS,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    pub symbols: Vec<String>,
    pub poll_interval_secs: u64,
    pub cache_ttl_secs: u64,
}

impl FeedConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            symbols: default_symbols(),
            poll_interval_secs: 30,  // matches the cache TTL
            cache_ttl_secs: 30,
        }
    }
}
