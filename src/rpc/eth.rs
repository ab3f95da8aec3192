use alloy::network::TransactionBuilder;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::http::Http;
use std::time::Duration;
use crate::error::{Error, Result};
use crate::observability::metrics::{RPC_CALLS, RPC_ERRORS};

/// Read-only access to a node over HTTP JSON-RPC.
#[derive(Clone)]
pub struct EthClient {
    provider: DynProvider,
    endpoint: String,
}

impl EthClient {
    /// HTTP provider whose requests give up after `timeout`.
    pub fn connect_http(url: &str, timeout: Duration) -> Result<Self> {
        let parsed: reqwest::Url = url
            .parse()
            .map_err(|e| Error::ConfigError(format!("rpc.url {}: {}", url, e)))?;
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        let client = RpcClient::new(Http::with_client(http_client, parsed), false);
        let provider = ProviderBuilder::new().connect_client(client).erased();

        Ok(EthClient::from_provider(provider, url))
    }

    pub fn from_provider(provider: DynProvider, endpoint: &str) -> Self {
        EthClient {
            provider,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `eth_call` of `call` against `to` at the latest block.
    pub async fn call<C: SolCall + Send>(&self, to: Address, call: C) -> Result<C::Return> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(call.abi_encode());

        RPC_CALLS.inc();
        tracing::trace!(%to, method = C::SIGNATURE, "eth_call");

        let output = self.provider.call(tx).await.map_err(|e| {
            RPC_ERRORS.inc();
            Error::from(e)
        })?;

        C::abi_decode_returns(&output)
            .map_err(|e| Error::AbiDecode(format!("{}: {}", C::SIGNATURE, e)))
    }

    pub async fn block_number(&self) -> Result<u64> {
        RPC_CALLS.inc();
        self.provider.get_block_number().await.map_err(|e| {
            RPC_ERRORS.inc();
            Error::from(e)
        })
    }
}
