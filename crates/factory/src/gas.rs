use alloy::primitives::U256;
use tracing::warn;

/// Fallback shown when the bytecode or price input is unusable. A rough
/// number beats blocking the preview screen on an estimate.
const FALLBACK_GAS_UNITS: u64 = 2_500_000;
const FALLBACK_COST: &str = "0.50";

/// Per-byte deployment cost plus the 21000 base fee and 32000 create
/// surcharge, matching what the wizard showed before precise estimation.
const GAS_PER_BYTE: u64 = 200;
const GAS_BASE: u64 = 53_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas_units: u64,
    /// Cost in the chain's display unit, formatted to 6 decimal places.
    pub cost_native: String,
    pub bytecode_size: usize,
}

/// Fixed estimate used when either the bytecode or the gas price is
/// unavailable; size is carried best-effort.
pub fn fallback_estimate(bytecode_hex: &str) -> GasEstimate {
    let stripped = bytecode_hex.trim().trim_start_matches("0x");
    GasEstimate {
        gas_units: FALLBACK_GAS_UNITS,
        cost_native: FALLBACK_COST.to_string(),
        bytecode_size: stripped.len() / 2,
    }
}

/// Deterministic pre-deployment cost preview from bytecode size and the
/// current gas price in base units (18 decimals). Never fails.
pub fn estimate_deployment_cost(bytecode_hex: &str, gas_price_wei: u128) -> GasEstimate {
    let stripped = bytecode_hex.trim().trim_start_matches("0x");
    if stripped.is_empty()
        || stripped.len() % 2 != 0
        || !stripped.chars().all(|c| c.is_ascii_hexdigit())
    {
        warn!("unusable bytecode input; returning fallback gas estimate");
        return fallback_estimate(bytecode_hex);
    }
    let bytecode_size = stripped.len() / 2;
    let gas_units = bytecode_size as u64 * GAS_PER_BYTE + GAS_BASE;

    GasEstimate {
        gas_units,
        cost_native: format_base_units(
            U256::from(gas_units) * U256::from(gas_price_wei),
        ),
        bytecode_size,
    }
}

/// Formats an 18-decimal base-unit amount with 6 fractional digits using
/// integer math only.
fn format_base_units(amount: U256) -> String {
    let one = U256::from(10u8).pow(U256::from(18u8));
    let micro = U256::from(10u8).pow(U256::from(12u8));
    let whole = amount / one;
    let frac = (amount % one) / micro;
    format!("{whole}.{frac:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_follows_size_formula() {
        // 4 bytes of bytecode.
        let est = estimate_deployment_cost("0x60806040", 1_000_000_000);
        assert_eq!(est.bytecode_size, 4);
        assert_eq!(est.gas_units, 4 * 200 + 53_000);
        // 53_800 gas * 1 gwei = 0.0000538 native.
        assert_eq!(est.cost_native, "0.000053");
    }

    #[test]
    fn empty_bytecode_returns_fallback() {
        let est = estimate_deployment_cost("", 1_000_000_000);
        assert_eq!(est.gas_units, FALLBACK_GAS_UNITS);
        assert_eq!(est.cost_native, FALLBACK_COST);
        assert_eq!(est.bytecode_size, 0);
    }

    #[test]
    fn malformed_bytecode_returns_fallback() {
        for input in ["0xzz", "0x123", "not hex at all"] {
            let est = estimate_deployment_cost(input, 1_000_000_000);
            assert_eq!(est.gas_units, FALLBACK_GAS_UNITS);
            assert_eq!(est.cost_native, FALLBACK_COST);
        }
    }

    #[test]
    fn zero_gas_price_costs_nothing() {
        let est = estimate_deployment_cost("0x6080", 0);
        assert_eq!(est.cost_native, "0.000000");
    }

    #[test]
    fn whole_unit_costs_format_with_six_decimals() {
        // 53_400 gas at 20_000 gwei ends up above one display unit.
        let est = estimate_deployment_cost("0x60806040", 20_000_000_000_000);
        assert_eq!(est.gas_units, 53_800);
        assert_eq!(est.cost_native, "1.076000");
    }
}
