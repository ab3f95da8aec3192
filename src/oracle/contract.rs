use async_trait::async_trait;
use crate::abi::{ContractInterface, IPriceOracle, ORACLE_FUNCTIONS};
use crate::error::{Error, Result};
use crate::oracle::OracleReader;
use crate::rpc::EthClient;
use crate::types::{Address, U256};

/// `OracleReader` backed by `eth_call` against a live node.
pub struct OracleContract {
    eth: EthClient,
}

impl OracleContract {
    /// Fails if `interface` does not declare the oracle read methods with the
    /// argument and return types the bindings encode.
    pub fn new(eth: EthClient, interface: ContractInterface) -> Result<Self> {
        interface.require(&ORACLE_FUNCTIONS)?;
        Ok(OracleContract { eth })
    }
}

#[async_trait]
impl OracleReader for OracleContract {
    async fn feed_exists(&self, oracle: &Address, symbol: &str) -> Result<bool> {
        self.eth
            .call(*oracle, IPriceOracle::feedExistsCall { symbol: symbol.to_string() })
            .await
    }

    async fn is_active(&self, oracle: &Address, symbol: &str) -> Result<bool> {
        self.eth
            .call(*oracle, IPriceOracle::isActiveCall { symbol: symbol.to_string() })
            .await
    }

    async fn get_price(&self, oracle: &Address, symbol: &str) -> Result<U256> {
        self.eth
            .call(*oracle, IPriceOracle::getPriceCall { symbol: symbol.to_string() })
            .await
    }

    async fn get_last_updated(&self, oracle: &Address, symbol: &str) -> Result<u64> {
        let raw = self.eth
            .call(*oracle, IPriceOracle::getLastUpdatedCall { symbol: symbol.to_string() })
            .await?;
        u64::try_from(raw)
            .map_err(|_| Error::AbiDecode(format!("last-updated {} does not fit in u64", raw)))
    }
}
