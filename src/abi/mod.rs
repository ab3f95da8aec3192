//! Bindings for the price oracle contract.

pub mod interface;

use alloy::sol;
use alloy::sol_types::SolCall;

pub use interface::ContractInterface;

sol! {
    /// Read-only surface of the deployed price oracle.
    interface IPriceOracle {
        function feedExists(string symbol) external view returns (bool);
        function isActive(string symbol) external view returns (bool);
        function getPrice(string symbol) external view returns (uint256);
        function getLastUpdated(string symbol) external view returns (uint256);
    }
}

/// Name and selector of every method the watcher calls.
pub const ORACLE_FUNCTIONS: [(&str, [u8; 4]); 4] = [
    ("feedExists", IPriceOracle::feedExistsCall::SELECTOR),
    ("isActive", IPriceOracle::isActiveCall::SELECTOR),
    ("getPrice", IPriceOracle::getPriceCall::SELECTOR),
    ("getLastUpdated", IPriceOracle::getLastUpdatedCall::SELECTOR),
];
