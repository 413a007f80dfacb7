pub mod client;
pub mod deploy;
pub mod fees;
pub mod pin;
pub mod verify;

pub use client::NodeClient;
pub use deploy::{ContractDeployer, DeploymentReceipt};
pub use fees::{FeeStrategy, GasMode};
pub use pin::{normalize_ipfs_uri, PinningClient};
pub use verify::{ContractVerifier, VerifyOutcome};
