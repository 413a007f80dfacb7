use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One completed deployment, as remembered locally. Nothing here is
/// authoritative; the chain is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub tx_hash: String,
    pub contract_address: String,
    pub timestamp_ms: u64,
    pub contract_type: String,
    pub contract_name: String,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub initial_supply: Option<String>,
    #[serde(default)]
    pub metadata_uri: Option<String>,
    pub deployed_by: String,
    pub network: String,
}

/// Append-mostly JSON file of deployment records, newest first, keyed by
/// contract address for lookups.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A missing or unreadable file is an empty history, not an error;
    /// losing the local log must never block the wizard.
    pub fn load(&self) -> Vec<DeploymentRecord> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt history file; starting empty");
                Vec::new()
            }
        }
    }

    pub fn append(&self, record: DeploymentRecord) -> Result<()> {
        let mut records = self.load();
        records.insert(0, record);
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    pub fn find(&self, contract_address: &str) -> Option<DeploymentRecord> {
        self.load()
            .into_iter()
            .find(|r| r.contract_address.eq_ignore_ascii_case(contract_address))
    }

    pub fn for_deployer(&self, deployer: &str) -> Vec<DeploymentRecord> {
        self.load()
            .into_iter()
            .filter(|r| r.deployed_by.eq_ignore_ascii_case(deployer))
            .collect()
    }
}
