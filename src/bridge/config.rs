use crate::error::DynResult;
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for talking to one bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HueConfig {
    /// API key / app name registered with the bridge
    pub key: String,
    /// Address of the bridge
    pub ip: String,
    /// Number of lamps controlled by the bridge
    pub number_of_lamps: u32,
    /// Query the state of all lamps on init
    pub retrieve_initial_state: bool,
    /// Lamp color transition time in milliseconds
    pub transition_time: u32,
    /// Timeout of all bridge communication in milliseconds
    pub timeout: u64,
}

impl Default for HueConfig {
    fn default() -> Self {
        HueConfig {
            key: "testapp".to_string(),
            ip: "localhost".to_string(),
            number_of_lamps: 3,
            retrieve_initial_state: false,
            transition_time: 400,
            timeout: 2000,
        }
    }
}

impl HueConfig {
    pub fn new(ip: &str, key: &str) -> HueConfig {
        HueConfig {
            ip: ip.to_string(),
            key: key.to_string(),
            ..HueConfig::default()
        }
    }

    pub fn from_json(json: &str) -> DynResult<HueConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> DynResult<HueConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        HueConfig::from_json(&text)
    }

    pub fn base_api_url(&self) -> String {
        format!("http://{}/api/{}", self.ip, self.key)
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}
