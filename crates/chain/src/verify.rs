use alloy::primitives::Address;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use wizard_core::config::VerifyConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    AlreadyVerified,
    Failed(String),
}

/// Shell around the external source-verification command. Explorers index
/// new contracts with a lag, so indexing misses retry with a delay while
/// hard failures stop immediately.
pub struct ContractVerifier {
    cfg: VerifyConfig,
}

impl ContractVerifier {
    pub fn new(cfg: VerifyConfig) -> Self {
        Self { cfg }
    }

    pub async fn verify(
        &self,
        address: Address,
        constructor_args: &[String],
    ) -> Result<VerifyOutcome> {
        let args_path = self.write_args_file(address, constructor_args)?;
        let result = self.run_with_retries(address, &args_path).await;
        let _ = std::fs::remove_file(&args_path);
        result
    }

    async fn run_with_retries(
        &self,
        address: Address,
        args_path: &PathBuf,
    ) -> Result<VerifyOutcome> {
        let mut last_error = String::new();
        for attempt in 1..=self.cfg.max_attempts {
            info!(%address, attempt, max = self.cfg.max_attempts, "verification attempt");
            let output = self.spawn_command(address, args_path).await?;
            let stdout = String::from_utf8_lossy(&output.stdout).to_string();
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let combined = format!("{stdout}\n{stderr}");

            if output.status.success() {
                info!(%address, "contract source verified");
                return Ok(VerifyOutcome::Verified);
            }
            match classify_failure(&combined) {
                FailureKind::AlreadyVerified => {
                    info!(%address, "contract source already verified");
                    return Ok(VerifyOutcome::AlreadyVerified);
                }
                FailureKind::NotYetIndexed => {
                    last_error = combined;
                    if attempt < self.cfg.max_attempts {
                        warn!(
                            %address,
                            delay_ms = self.cfg.retry_delay_ms,
                            "explorer has not indexed the contract yet; retrying"
                        );
                        sleep(Duration::from_millis(self.cfg.retry_delay_ms)).await;
                    }
                }
                FailureKind::Hard => {
                    warn!(%address, "verification failed with a non-retryable error");
                    return Ok(VerifyOutcome::Failed(combined));
                }
            }
        }
        Ok(VerifyOutcome::Failed(last_error))
    }

    async fn spawn_command(
        &self,
        address: Address,
        args_path: &PathBuf,
    ) -> Result<std::process::Output> {
        let mut parts = self.cfg.command.split_whitespace();
        let program = parts
            .next()
            .context("verify.command is empty")?;
        let mut cmd = Command::new(program);
        cmd.args(parts)
            .arg("--network")
            .arg(&self.cfg.network)
            .arg("--constructor-args")
            .arg(args_path)
            .arg(address.to_string());
        cmd.output()
            .await
            .with_context(|| format!("failed to run verify command {:?}", self.cfg.command))
    }

    fn write_args_file(&self, address: Address, args: &[String]) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(format!(
            "arguments-{}.js",
            address.to_string().to_lowercase()
        ));
        let json = serde_json::to_string_pretty(args)?;
        std::fs::write(&path, format!("module.exports = {json};\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

enum FailureKind {
    AlreadyVerified,
    NotYetIndexed,
    Hard,
}

fn classify_failure(output: &str) -> FailureKind {
    let lowered = output.to_ascii_lowercase();
    if lowered.contains("already verified") {
        FailureKind::AlreadyVerified
    } else if lowered.contains("not found")
        || lowered.contains("no bytecode")
        || lowered.contains("bytecode does not match")
    {
        FailureKind::NotYetIndexed
    } else {
        FailureKind::Hard
    }
}
