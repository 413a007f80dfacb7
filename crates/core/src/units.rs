use alloy::primitives::U256;
use anyhow::{anyhow, bail, Result};

/// Token amounts are entered in whole-token units; the contract templates
/// fix 18 decimals for ERC20 supplies.
pub const TOKEN_DECIMALS: u8 = 18;

/// Scales a user-facing decimal string into on-chain integer units with
/// exact arithmetic over the string representation. Large supplies would
/// silently lose precision under f64, so floats are never involved.
pub fn scale_decimal(value: &str, decimals: u8) -> Result<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("empty decimal value");
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        bail!("invalid decimal value: {value}");
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        bail!("invalid decimal value: {value}");
    }
    if frac_part.len() > decimals as usize {
        bail!(
            "too many decimal places in {value}: at most {decimals} supported"
        );
    }

    let scale = U256::from(10u8).pow(U256::from(decimals));
    let int_units = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10)?
            .checked_mul(scale)
            .ok_or_else(|| anyhow!("decimal value overflows uint256: {value}"))?
    };

    let frac_units = if frac_part.is_empty() {
        U256::ZERO
    } else {
        let shift = U256::from(10u8).pow(U256::from(decimals as usize - frac_part.len()));
        U256::from_str_radix(frac_part, 10)? * shift
    };

    int_units
        .checked_add(frac_units)
        .ok_or_else(|| anyhow!("decimal value overflows uint256: {value}"))
}

/// Parses a non-negative integer count (NFT supply caps, wallet limits).
/// No scaling: these are already on-chain units.
pub fn parse_integer(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        bail!("invalid integer value: {value}");
    }
    Ok(U256::from_str_radix(trimmed, 10)?)
}
