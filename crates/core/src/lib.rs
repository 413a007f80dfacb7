pub mod config;
pub mod error;
pub mod types;
pub mod units;
pub mod utils;

pub use config::AppConfig;
pub use error::{Error, Result};
