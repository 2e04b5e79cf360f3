//! In-memory bridge, answering requests the way a real bridge does.

use super::discovery::DISCOVERY_ENDPOINT;
use super::states::{Alert, ColorMode, Effect, Lamp, LampState};
use super::transport::{BridgeTransport, DynFuture, TransportError, TransportResult};
use crate::color::XyPoint;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::future;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SimRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

struct SimState {
    lamps: BTreeMap<u32, Lamp>,
    discovery_endpoint: String,
    discovery: Value,
    requests: Vec<SimRequest>,
    offline: bool,
}

pub struct BridgeSimulator {
    base: String,
    state: Mutex<SimState>,
}

fn not_available(address: &str) -> Value {
    json!([{"error": {
        "type": 3,
        "address": address,
        "description": format!("resource, {}, not available", address)
    }}])
}

fn invalid_value(address: &str, value: &Value) -> Value {
    json!({"error": {
        "type": 7,
        "address": address,
        "description": format!("invalid value, {}, for parameter, {}", value, address)
    }})
}

/// Apply a single attribute. Returns false if the value is not accepted.
fn apply_attribute(state: &mut LampState, key: &str, value: &Value) -> bool {
    match key {
        "on" => value.as_bool().map(|on| state.on = Some(on)).is_some(),
        "bri" => value
            .as_u64()
            .and_then(|b| u8::try_from(b).ok())
            .map(|b| state.bri = Some(b.clamp(1, 254)))
            .is_some(),
        "bri_inc" => value
            .as_i64()
            .map(|inc| {
                let bri = i64::from(state.bri.unwrap_or(1)) + inc;
                state.bri = Some(bri.clamp(1, 254) as u8);
            })
            .is_some(),
        "xy" => serde_json::from_value::<XyPoint>(value.clone())
            .map(|xy| {
                state.xy = Some(xy);
                state.colormode = Some(ColorMode::Xy);
            })
            .is_ok(),
        "ct" => value
            .as_u64()
            .and_then(|ct| u16::try_from(ct).ok())
            .map(|ct| {
                state.ct = Some(ct.clamp(153, 500));
                state.colormode = Some(ColorMode::Ct);
            })
            .is_some(),
        "alert" => serde_json::from_value::<Alert>(value.clone())
            .map(|a| state.alert = Some(a))
            .is_ok(),
        "effect" => serde_json::from_value::<Effect>(value.clone())
            .map(|e| state.effect = Some(e))
            .is_ok(),
        "transitiontime" => value.as_u64().is_some(),
        _ => false,
    }
}

impl BridgeSimulator {
    pub fn new(ip: &str, key: &str) -> BridgeSimulator {
        BridgeSimulator {
            base: format!("http://{}/api/{}", ip, key),
            state: Mutex::new(SimState {
                lamps: BTreeMap::new(),
                discovery_endpoint: DISCOVERY_ENDPOINT.to_string(),
                discovery: json!([]),
                requests: Vec::new(),
                offline: false,
            }),
        }
    }

    /// Add a lamp that is on at full brightness
    pub fn add_lamp(&self, index: u32, name: &str, reachable: bool) {
        let lamp = Lamp {
            state: LampState {
                on: Some(true),
                bri: Some(254),
                xy: Some(XyPoint::new(0.3227, 0.329)),
                ct: Some(366),
                alert: Some(Alert::None),
                effect: Some(Effect::None),
                colormode: Some(ColorMode::Xy),
                reachable: Some(reachable),
                ..Default::default()
            },
            lamp_type: "Extended color light".to_string(),
            name: name.to_string(),
            modelid: "LCT001".to_string(),
            swversion: "66009461".to_string(),
            pointsymbol: None,
            lamp_index: index,
        };
        self.state.lock().unwrap().lamps.insert(index, lamp);
    }

    pub fn lamp_state(&self, index: u32) -> Option<LampState> {
        self.state
            .lock()
            .unwrap()
            .lamps
            .get(&index)
            .map(|l| l.state.clone())
    }

    pub fn set_discovery(&self, bridges: Value) {
        self.state.lock().unwrap().discovery = bridges;
    }

    /// Answer discovery requests at another URL
    pub fn set_discovery_endpoint(&self, url: &str) {
        self.state.lock().unwrap().discovery_endpoint = url.to_string();
    }

    /// All requests fail with a timeout while offline
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn requests(&self) -> Vec<SimRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<SimRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    fn path<'u>(&self, url: &'u str) -> Option<&'u str> {
        url.strip_prefix(&self.base)
    }

    fn handle_get(&self, state: &mut SimState, url: &str) -> TransportResult {
        if url == state.discovery_endpoint {
            return Ok(state.discovery.clone());
        }
        let path = self.path(url).ok_or(TransportError::Status(404))?;
        let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match parts.as_slice() {
            ["lights"] => {
                let mut all = Map::new();
                for (index, lamp) in &state.lamps {
                    all.insert(index.to_string(), serde_json::to_value(lamp)?);
                }
                Ok(Value::Object(all))
            }
            ["lights", n] => match n.parse::<u32>().ok().and_then(|i| state.lamps.get(&i)) {
                Some(lamp) => Ok(serde_json::to_value(lamp)?),
                None => Ok(not_available(&format!("/lights/{}", n))),
            },
            _ => Err(TransportError::Status(404)),
        }
    }

    fn apply(lamp: &mut Lamp, prefix: &str, body: &Value, replies: &mut Vec<Value>) {
        let Some(attrs) = body.as_object() else {
            return;
        };
        for (key, value) in attrs {
            let address = format!("{}/{}", prefix, key);
            if apply_attribute(&mut lamp.state, key, value) {
                replies.push(json!({"success": {address: value}}));
            } else {
                replies.push(invalid_value(&address, value));
            }
        }
    }

    fn handle_put(&self, state: &mut SimState, url: &str, body: &Value) -> TransportResult {
        let path = self.path(url).ok_or(TransportError::Status(404))?;
        let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let mut replies = Vec::new();
        match parts.as_slice() {
            ["lights", n, "state"] => {
                let prefix = format!("/lights/{}/state", n);
                match n.parse::<u32>().ok().and_then(|i| state.lamps.get_mut(&i)) {
                    Some(lamp) => Self::apply(lamp, &prefix, body, &mut replies),
                    None => return Ok(not_available(&format!("/lights/{}", n))),
                }
            }
            ["groups", g, "action"] => {
                // Only the group of all lamps exists
                if *g != "0" {
                    return Ok(not_available(&format!("/groups/{}", g)));
                }
                let prefix = format!("/groups/{}/action", g);
                let mut lamp_replies = Vec::new();
                for lamp in state.lamps.values_mut() {
                    lamp_replies.clear();
                    Self::apply(lamp, &prefix, body, &mut lamp_replies);
                }
                if lamp_replies.is_empty() {
                    // No lamps, acknowledge anyway
                    if let Some(attrs) = body.as_object() {
                        for (key, value) in attrs {
                            let address = format!("{}/{}", prefix, key);
                            lamp_replies.push(json!({"success": {address: value}}));
                        }
                    }
                }
                replies = lamp_replies;
            }
            _ => return Err(TransportError::Status(404)),
        }
        Ok(Value::Array(replies))
    }

    fn handle(&self, method: &'static str, url: &str, body: Option<Value>) -> TransportResult {
        let mut state = self.state.lock().unwrap();
        state.requests.push(SimRequest {
            method,
            url: url.to_string(),
            body: body.clone(),
        });
        if state.offline {
            return Err(TransportError::Timeout);
        }
        match body {
            None => self.handle_get(&mut state, url),
            Some(body) => self.handle_put(&mut state, url, &body),
        }
    }
}

impl BridgeTransport for BridgeSimulator {
    fn get<'a>(&'a self, url: &'a str) -> DynFuture<'a, TransportResult> {
        Box::pin(future::ready(self.handle("GET", url, None)))
    }

    fn put<'a>(&'a self, url: &'a str, body: Value) -> DynFuture<'a, TransportResult> {
        Box::pin(future::ready(self.handle("PUT", url, Some(body))))
    }
}
