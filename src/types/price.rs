use alloy::primitives::{utils as units, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::timestamp::NOT_AVAILABLE;

/// Decimal scale the oracle contract stores prices in.
pub const PRICE_DECIMALS: u8 = 8;

/// One symbol's view of the oracle at the time of a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub symbol: String,
    pub price: String,
    pub last_updated: String,
    pub exists: bool,
    pub is_active: bool,
}

impl PriceRecord {
    /// Inert record used for missing feeds and failed reads.
    pub fn placeholder(symbol: &str) -> Self {
        PriceRecord {
            symbol: symbol.to_string(),
            price: "0".to_string(),
            last_updated: NOT_AVAILABLE.to_string(),
            exists: false,
            is_active: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.exists && self.is_active
    }
}

impl fmt::Display for PriceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match (self.exists, self.is_active) {
            (false, _) => "missing",
            (true, false) => "inactive",
            (true, true) => "active",
        };
        write!(f, "{:<6} {:>20} {:<24} {}", self.symbol, self.price, self.last_updated, status)
    }
}

/// Render a raw integer amount with `decimals` fractional digits.
///
/// Trailing fractional zeros are trimmed but one digit is always kept,
/// so `100000000` at 8 decimals renders as `1.0`.
pub fn format_units(value: U256, decimals: u8) -> String {
    let fixed = match units::format_units(value, decimals) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Cannot scale {} by {} decimals: {}", value, decimals, e);
            return value.to_string();
        }
    };

    match fixed.split_once('.') {
        Some((int_part, frac_part)) => {
            let frac = frac_part.trim_end_matches('0');
            format!("{}.{}", int_part, if frac.is_empty() { "0" } else { frac })
        }
        None => format!("{}.0", fixed),
    }
}
