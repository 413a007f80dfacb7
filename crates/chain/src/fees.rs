use alloy::rpc::types::TransactionRequest;
use anyhow::{bail, Result};
use wizard_core::config::DeployConfig;

#[derive(Debug, Clone, Copy)]
pub enum GasMode {
    Eip1559,
    Legacy,
}

impl GasMode {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "eip1559" | "eip-1559" | "1559" => Ok(Self::Eip1559),
            "legacy" => Ok(Self::Legacy),
            _ => bail!("unsupported gas_mode: {raw}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeeStrategy {
    pub gas_mode: GasMode,
    pub max_fee_gwei: u64,
    pub max_priority_gwei: u64,
}

impl FeeStrategy {
    pub fn from_config(cfg: &DeployConfig) -> Result<Self> {
        Ok(Self {
            gas_mode: GasMode::parse(&cfg.gas_mode)?,
            max_fee_gwei: cfg.max_fee_gwei,
            max_priority_gwei: cfg.max_priority_gwei,
        })
    }

    pub fn apply(&self, tx: &mut TransactionRequest) {
        match self.gas_mode {
            GasMode::Eip1559 => {
                tx.max_fee_per_gas = Some(gwei_to_wei(self.max_fee_gwei));
                tx.max_priority_fee_per_gas = Some(gwei_to_wei(self.max_priority_gwei));
            }
            GasMode::Legacy => {
                tx.gas_price = Some(gwei_to_wei(self.max_fee_gwei));
            }
        }
    }
}

fn gwei_to_wei(gwei: u64) -> u128 {
    (gwei as u128) * 1_000_000_000u128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip1559_sets_both_caps() {
        let strategy = FeeStrategy {
            gas_mode: GasMode::Eip1559,
            max_fee_gwei: 50,
            max_priority_gwei: 2,
        };
        let mut tx = TransactionRequest::default();
        strategy.apply(&mut tx);
        assert_eq!(tx.max_fee_per_gas, Some(50_000_000_000));
        assert_eq!(tx.max_priority_fee_per_gas, Some(2_000_000_000));
        assert_eq!(tx.gas_price, None);
    }

    #[test]
    fn legacy_sets_gas_price_only() {
        let strategy = FeeStrategy {
            gas_mode: GasMode::Legacy,
            max_fee_gwei: 30,
            max_priority_gwei: 2,
        };
        let mut tx = TransactionRequest::default();
        strategy.apply(&mut tx);
        assert_eq!(tx.gas_price, Some(30_000_000_000));
        assert_eq!(tx.max_fee_per_gas, None);
    }

    #[test]
    fn gas_mode_parse_variants() {
        assert!(matches!(GasMode::parse("eip-1559").unwrap(), GasMode::Eip1559));
        assert!(matches!(GasMode::parse("LEGACY").unwrap(), GasMode::Legacy));
        assert!(GasMode::parse("blob").is_err());
    }
}
