use alloy::primitives::{Address, B256, TxKind};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::transaction::TransactionInput;
use alloy::rpc::types::TransactionRequest;
use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use tracing::info;
use wizard_factory::DeploymentData;

use crate::fees::FeeStrategy;

#[derive(Debug, Clone)]
pub struct DeploymentReceipt {
    pub address: Address,
    pub tx_hash: B256,
    pub gas_used: u64,
}

/// Thin collaborator around the create transaction. The core never calls
/// this; the CLI sequences encode -> deploy -> record.
#[derive(Clone)]
pub struct ContractDeployer {
    provider: DynProvider,
    fees: FeeStrategy,
    receipt_timeout: Duration,
}

impl ContractDeployer {
    pub fn new(provider: DynProvider, fees: FeeStrategy, receipt_timeout_ms: u64) -> Self {
        Self {
            provider,
            fees,
            receipt_timeout: Duration::from_millis(receipt_timeout_ms),
        }
    }

    pub async fn deploy(&self, data: &DeploymentData) -> Result<DeploymentReceipt> {
        let init_code = data.init_code();
        let mut tx = TransactionRequest {
            to: Some(TxKind::Create),
            input: TransactionInput::new(init_code),
            ..Default::default()
        };
        self.fees.apply(&mut tx);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("create transaction rejected")?;
        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, "deployment broadcast");

        let receipt = pending
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await
            .context("timed out waiting for deployment receipt")?;
        let address = receipt
            .contract_address
            .ok_or_else(|| anyhow!("receipt for {tx_hash} carries no contract address"))?;
        info!(%address, gas_used = receipt.gas_used, "contract deployed");

        Ok(DeploymentReceipt {
            address,
            tx_hash,
            gas_used: receipt.gas_used,
        })
    }
}
