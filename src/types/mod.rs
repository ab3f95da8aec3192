pub mod address;
pub mod price;
pub mod timestamp;

pub use address::{parse_address, Address};
pub use alloy::primitives::U256;
pub use price::{PriceRecord, PRICE_DECIMALS, format_units};
