pub mod encoder;
pub mod gas;
pub mod templates;

pub use encoder::{encode_deployment, DeploymentData, ValidationError};
pub use gas::{estimate_deployment_cost, fallback_estimate, GasEstimate};
pub use templates::ContractTemplate;
