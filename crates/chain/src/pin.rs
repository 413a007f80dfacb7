use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;
use wizard_core::config::PinningConfig;

const DEFAULT_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Uploads JSON metadata to the configured pinning service and returns
/// the content identifier. The wizard only needs "store a file, get back
/// a CID"; everything else about the service is opaque.
pub struct PinningClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PinningClient {
    pub fn from_config(cfg: &PinningConfig) -> Result<Option<Self>> {
        let endpoint = match &cfg.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => return Ok(None),
        };
        let api_key = match &cfg.api_key_env {
            Some(env) => Some(
                std::env::var(env)
                    .with_context(|| format!("missing {env} in environment"))?,
            ),
            None => None,
        };
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()?;
        Ok(Some(Self {
            client,
            endpoint,
            api_key,
        }))
    }

    pub async fn pin_json(&self, metadata: &Value) -> Result<String> {
        let mut request = self.client.post(&self.endpoint).json(metadata);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await?.error_for_status()?;
        let body: Value = response.json().await?;
        let cid = extract_cid(&body)?;
        info!(%cid, "metadata pinned");
        Ok(cid)
    }
}

/// Pinata-style responses carry `IpfsHash`; generic pinning daemons use
/// `cid`. Anything else is a malformed response.
fn extract_cid(body: &Value) -> Result<String> {
    body.get("IpfsHash")
        .or_else(|| body.get("cid"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("pinning response carries no content identifier"))
}

/// Normalizes a metadata URI to an HTTP gateway URL so previews resolve
/// regardless of how the user entered it.
pub fn normalize_ipfs_uri(uri: &str) -> String {
    if uri.is_empty() {
        return String::new();
    }
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return uri.to_string();
    }
    if let Some(hash) = uri.strip_prefix("ipfs://") {
        return format!("{DEFAULT_GATEWAY}{hash}");
    }
    // Bare CID (v0 or v1).
    if uri.starts_with("Qm") || uri.starts_with("bafy") {
        return format!("{DEFAULT_GATEWAY}{uri}");
    }
    uri.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cid_extraction_accepts_both_response_shapes() {
        let pinata = json!({ "IpfsHash": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG" });
        assert_eq!(
            extract_cid(&pinata).unwrap(),
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );

        let daemon = json!({ "cid": "bafybeic5wusdlmndycj6vb" });
        assert_eq!(extract_cid(&daemon).unwrap(), "bafybeic5wusdlmndycj6vb");
    }

    #[test]
    fn cid_extraction_rejects_malformed_responses() {
        assert!(extract_cid(&json!({ "status": "pinned" })).is_err());
        assert!(extract_cid(&json!({ "cid": 42 })).is_err());
    }

    #[test]
    fn client_is_absent_without_an_endpoint() {
        let client = PinningClient::from_config(&PinningConfig::default()).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn http_uris_pass_through() {
        assert_eq!(
            normalize_ipfs_uri("https://example.com/meta.json"),
            "https://example.com/meta.json"
        );
    }

    #[test]
    fn ipfs_scheme_rewrites_to_gateway() {
        assert_eq!(
            normalize_ipfs_uri("ipfs://bafybeic5wusdlmndycj6vb"),
            "https://ipfs.io/ipfs/bafybeic5wusdlmndycj6vb"
        );
    }

    #[test]
    fn bare_cids_rewrite_to_gateway() {
        assert_eq!(
            normalize_ipfs_uri("QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
            "https://ipfs.io/ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
        assert_eq!(
            normalize_ipfs_uri("bafybeic5wusdlmndycj6vb"),
            "https://ipfs.io/ipfs/bafybeic5wusdlmndycj6vb"
        );
    }

    #[test]
    fn unknown_formats_and_empty_are_untouched() {
        assert_eq!(normalize_ipfs_uri(""), "");
        assert_eq!(normalize_ipfs_uri("ar://something"), "ar://something");
    }
}
