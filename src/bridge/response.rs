//! Confirmations returned by the bridge for state changes.
//!
//! The bridge answers a PUT with an array where each entry is either
//! `{"success": {...}}` or `{"error": {...}}`.

use serde_json::{Map, Value};
use std::fmt;

/// A lamp attribute that was changed, e.g. `/lights/1/state/on`
#[derive(Debug, Clone, PartialEq)]
pub struct StateChangeConfirmation {
    pub attribute: String,
    pub value: Value,
}

/// A group action that was acknowledged, e.g. `/groups/0/action/on`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupActionConfirmation {
    pub address: String,
    pub value: Value,
}

/// Error entry reported by the bridge
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: u64,
    pub address: String,
    pub description: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bridge error {} at {}: {}",
            self.kind, self.address, self.description
        )
    }
}

fn entries(response: &Value) -> &[Value] {
    match response {
        Value::Array(a) => a.as_slice(),
        _ => &[],
    }
}

fn success_of(entry: &Value) -> Option<&Map<String, Value>> {
    entry.get("success").and_then(Value::as_object)
}

fn collect_errors(response: &Value) -> Vec<ApiError> {
    entries(response)
        .iter()
        .filter_map(|entry| entry.get("error"))
        .map(|err| ApiError {
            kind: err.get("type").and_then(Value::as_u64).unwrap_or(0),
            address: err
                .get("address")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            description: err
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateChangeResponse {
    pub changed_states: Vec<StateChangeConfirmation>,
    pub errors: Vec<ApiError>,
}

impl StateChangeResponse {
    /// Only keys referring to a lamp state are kept. If an entry has several,
    /// the last one in the order sent by the bridge is used.
    pub fn from_json(response: &Value) -> StateChangeResponse {
        let changed_states = entries(response)
            .iter()
            .filter_map(success_of)
            .filter_map(|success| {
                success
                    .iter()
                    .filter(|(key, _)| key.contains("/lights/") && key.contains("/state/"))
                    .last()
                    .map(|(key, value)| StateChangeConfirmation {
                        attribute: key.clone(),
                        value: value.clone(),
                    })
            })
            .collect();
        StateChangeResponse {
            changed_states,
            errors: collect_errors(response),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupActionResponse {
    pub acknowledged_actions: Vec<GroupActionConfirmation>,
    pub errors: Vec<ApiError>,
}

impl GroupActionResponse {
    /// Accepts both `{"address": .., "value": ..}` and `{"<address>": <value>}`
    /// success entries.
    pub fn from_json(response: &Value) -> GroupActionResponse {
        let mut acknowledged_actions = Vec::new();
        for success in entries(response).iter().filter_map(success_of) {
            match (success.get("address"), success.get("value")) {
                (Some(Value::String(address)), Some(value)) => {
                    acknowledged_actions.push(GroupActionConfirmation {
                        address: address.clone(),
                        value: value.clone(),
                    })
                }
                _ => {
                    for (address, value) in success {
                        acknowledged_actions.push(GroupActionConfirmation {
                            address: address.clone(),
                            value: value.clone(),
                        });
                    }
                }
            }
        }
        GroupActionResponse {
            acknowledged_actions,
            errors: collect_errors(response),
        }
    }
}
