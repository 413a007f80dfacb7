use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub deploy: DeployConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
    #[serde(default)]
    pub pinning: PinningConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub rpc_http: String,
    /// Label stored alongside deployment records, e.g. "Arc Testnet".
    pub network_name: String,
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    pub deployer_private_key_env: String,
    #[serde(default = "default_gas_mode")]
    pub gas_mode: String,
    #[serde(default = "default_max_fee_gwei")]
    pub max_fee_gwei: u64,
    #[serde(default = "default_max_priority_gwei")]
    pub max_priority_gwei: u64,
    #[serde(default = "default_receipt_timeout_ms")]
    pub receipt_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default = "default_verify_command")]
    pub command: String,
    #[serde(default = "default_verify_network")]
    pub network: String,
    #[serde(default = "default_verify_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_verify_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinningConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default = "default_pin_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("WIZARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            command: default_verify_command(),
            network: default_verify_network(),
            max_attempts: default_verify_max_attempts(),
            retry_delay_ms: default_verify_retry_delay_ms(),
        }
    }
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: None,
            request_timeout_ms: default_pin_timeout_ms(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_native_symbol() -> String {
    "USDC".to_string()
}

fn default_gas_mode() -> String {
    "eip1559".to_string()
}

fn default_max_fee_gwei() -> u64 {
    50
}

fn default_max_priority_gwei() -> u64 {
    2
}

fn default_receipt_timeout_ms() -> u64 {
    120_000
}

fn default_verify_command() -> String {
    "npx hardhat verify".to_string()
}

fn default_verify_network() -> String {
    "arcTestnet".to_string()
}

fn default_verify_max_attempts() -> u32 {
    3
}

fn default_verify_retry_delay_ms() -> u64 {
    8_000
}

fn default_pin_timeout_ms() -> u64 {
    15_000
}

fn default_history_path() -> String {
    "wizard-history.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
