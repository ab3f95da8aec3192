pub mod contract;

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{Address, U256};

pub use contract::OracleContract;

/// Read methods exposed by a price oracle deployment.
#[async_trait]
pub trait OracleReader: Send + Sync {
    async fn feed_exists(&self, oracle: &Address, symbol: &str) -> Result<bool>;
    async fn is_active(&self, oracle: &Address, symbol: &str) -> Result<bool>;
    /// Raw price at the oracle's fixed decimal scale.
    async fn get_price(&self, oracle: &Address, symbol: &str) -> Result<U256>;
    /// Unix seconds of the last price update.
    async fn get_last_updated(&self, oracle: &Address, symbol: &str) -> Result<u64>;
}
