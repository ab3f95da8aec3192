pub use alloy::primitives::Address;

use crate::error::{Error, Result};

/// Parse a hex address as accepted in config and API requests.
///
/// Case is ignored; the EIP-55 checksum is not enforced.
pub fn parse_address(s: &str) -> Result<Address> {
    let trimmed = s.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(Error::InvalidAddress(format!("missing 0x prefix: {}", trimmed)));
    }
    trimmed
        .parse::<Address>()
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", trimmed, e)))
}
