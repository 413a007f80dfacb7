use alloy::primitives::Address;
use anyhow::anyhow;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s.trim()).map_err(|e| anyhow!("invalid address {s}: {e}"))
}

/// Abbreviates an address for display: `0x12345678...`.
pub fn short_address(s: &str) -> String {
    if s.len() > 10 {
        format!("{}...", &s[..10])
    } else {
        s.to_string()
    }
}
