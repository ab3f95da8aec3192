pub mod abi;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod observability;
pub mod oracle;
pub mod rpc;
pub mod types;

pub use error::{Error, Result};
pub use feed::{FeedControl, FeedPoller, FeedState, FeedTarget, OracleFeed};
pub use oracle::{OracleContract, OracleReader};
pub use types::{Address, PriceRecord};
