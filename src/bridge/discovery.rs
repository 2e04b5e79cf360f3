use super::transport::BridgeTransport;
use crate::error::BridgeError;
use log::debug;
use serde_json::Value;

/// Cloud service listing the bridges on the caller's network. Needs a
/// transport that speaks HTTPS, which `HyperTransport` does not. Use
/// [`search_at`] with a plain HTTP mirror of the service otherwise.
pub const DISCOVERY_ENDPOINT: &str = "https://discovery.meethue.com/";

/// A bridge found by discovery. Fields not present in the answer are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeInfo {
    pub id: Option<String>,
    pub internal_ip_address: Option<String>,
}

impl BridgeInfo {
    pub fn from_json(entry: &Value) -> BridgeInfo {
        let text = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        BridgeInfo {
            id: text("id"),
            internal_ip_address: text("internalipaddress"),
        }
    }
}

pub fn parse_bridges(response: &Value) -> Result<Vec<BridgeInfo>, BridgeError> {
    match response {
        Value::Array(entries) => Ok(entries.iter().map(BridgeInfo::from_json).collect()),
        other => Err(BridgeError::UnexpectedResponse(format!(
            "Expected list of bridges, got {}",
            other
        ))),
    }
}

/// Query the public discovery service
pub async fn search(transport: &dyn BridgeTransport) -> Result<Vec<BridgeInfo>, BridgeError> {
    search_at(transport, DISCOVERY_ENDPOINT).await
}

/// Query a discovery service at `endpoint`, answering like the public one
pub async fn search_at(
    transport: &dyn BridgeTransport,
    endpoint: &str,
) -> Result<Vec<BridgeInfo>, BridgeError> {
    let response = transport.get(endpoint).await?;
    let bridges = parse_bridges(&response)?;
    debug!("Discovered {} bridge(s)", bridges.len());
    Ok(bridges)
}
