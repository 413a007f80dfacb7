use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use wizard_core::config::ChainConfig;

#[derive(Clone)]
pub struct NodeClient {
    pub http: DynProvider,
    /// Address of the loaded signer, when one was loaded.
    pub signer: Option<Address>,
}

impl NodeClient {
    /// Read-only provider for gas price queries and receipt polling.
    pub async fn connect(cfg: &ChainConfig) -> Result<Self> {
        let http = ProviderBuilder::new()
            .connect(&cfg.rpc_http)
            .await?
            .erased();
        Ok(Self { http, signer: None })
    }

    /// Signing provider for the deploy path. The key never appears in the
    /// config file itself, only the env var holding it.
    pub async fn connect_with_signer(
        cfg: &ChainConfig,
        private_key_env: &str,
    ) -> Result<Self> {
        let raw = std::env::var(private_key_env)
            .with_context(|| format!("missing {private_key_env} in environment"))?;
        let signer: PrivateKeySigner = raw
            .trim()
            .parse()
            .context("invalid deployer private key")?;
        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);
        let http = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&cfg.rpc_http)
            .await?
            .erased();
        Ok(Self {
            http,
            signer: Some(signer_address),
        })
    }

    pub async fn gas_price(&self) -> Result<u128> {
        Ok(self.http.get_gas_price().await?)
    }
}
