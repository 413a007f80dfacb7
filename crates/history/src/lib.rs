mod store;

pub use store::{DeploymentRecord, HistoryStore};
