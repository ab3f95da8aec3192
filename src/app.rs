use std::path::Path;
use std::sync::Arc;
use crate::abi::ContractInterface;
use crate::config::AppConfig;
use crate::error::Result;
use crate::feed::{FeedTarget, OracleFeed};
use crate::oracle::{OracleContract, OracleReader};
use crate::rpc::EthClient;

/// Wire the configured RPC endpoint and ABI into an `OracleFeed`.
///
/// No RPC URL leaves the feed without a provider. An unreachable node is only
/// logged here; fetches report it per symbol.
pub async fn connect(config: &AppConfig) -> Result<OracleFeed> {
    let reader = match config.rpc.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let eth = EthClient::connect_http(url, config.rpc.timeout())?;

            match eth.block_number().await {
                Ok(block) => tracing::info!("Connected to {} at block {}", url, block),
                Err(e) => tracing::warn!("RPC endpoint {} not responding: {}", url, e),
            }

            let interface = match &config.oracle.abi_path {
                Some(path) => ContractInterface::from_artifact_file(Path::new(path))?,
                None => ContractInterface::oracle_default(),
            };

            let contract: Arc<dyn OracleReader> = Arc::new(OracleContract::new(eth, interface)?);
            Some(contract)
        }
        None => {
            tracing::warn!("No RPC endpoint configured");
            None
        }
    };

    Ok(OracleFeed::new(reader, config.feed.cache_ttl()).with_decimals(config.oracle.decimals))
}

pub fn initial_target(config: &AppConfig) -> Result<FeedTarget> {
    Ok(FeedTarget::new(
        config.oracle.address()?,
        Some(config.feed.symbols.clone()),
    ))
}
