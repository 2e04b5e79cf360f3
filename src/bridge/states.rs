use crate::color::XyPoint;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    /// Short flash
    Select,
    /// Flash for 15 seconds
    #[serde(rename = "lselect")]
    LSelect,
    None,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[serde(rename = "colorloop")]
    ColorLoop,
    None,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Hs,
    Xy,
    Ct,
}

/// State of a lamp as reported by the bridge. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LampState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<XyPoint>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "colortemp")]
    pub ct: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colormode: Option<ColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reachable: Option<bool>,
}

/// A lamp known to the bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    #[serde(default)]
    pub state: LampState,
    #[serde(default, rename = "type")]
    pub lamp_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modelid: String,
    #[serde(default)]
    pub swversion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointsymbol: Option<Value>,
    /// 1-based index, taken from the key of the lamp listing
    #[serde(skip)]
    pub lamp_index: u32,
}

/// Body of a state change, only the set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri_inc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<XyPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// In steps of 100 ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitiontime: Option<u16>,
}

pub const DEFAULT_BRIGHTNESS_STEP: i32 = 10;

impl StateUpdate {
    pub fn power(on: bool) -> StateUpdate {
        StateUpdate {
            on: Some(on),
            ..Default::default()
        }
    }

    pub fn alert(alert: Alert) -> StateUpdate {
        StateUpdate {
            alert: Some(alert),
            ..Default::default()
        }
    }

    pub fn effect(effect: Effect) -> StateUpdate {
        StateUpdate {
            effect: Some(effect),
            ..Default::default()
        }
    }

    pub fn color(xy: XyPoint) -> StateUpdate {
        StateUpdate {
            xy: Some(xy),
            ..Default::default()
        }
    }

    pub fn brightness(bri: u8) -> StateUpdate {
        StateUpdate {
            bri: Some(bri),
            ..Default::default()
        }
    }

    pub fn color_temperature(mired: u16) -> StateUpdate {
        StateUpdate {
            ct: Some(mired),
            ..Default::default()
        }
    }

    /// Decrease brightness, 10 steps if no amount is given
    pub fn dim(decrement: Option<i32>) -> StateUpdate {
        StateUpdate {
            bri_inc: Some(-decrement.unwrap_or(DEFAULT_BRIGHTNESS_STEP).abs()),
            ..Default::default()
        }
    }

    pub fn brighten(increment: Option<i32>) -> StateUpdate {
        StateUpdate {
            bri_inc: Some(increment.unwrap_or(DEFAULT_BRIGHTNESS_STEP).abs()),
            ..Default::default()
        }
    }

    /// Transition time given in milliseconds
    pub fn with_transition_ms(mut self, ms: u32) -> StateUpdate {
        self.transitiontime = Some(u16::try_from(ms / 100).unwrap_or(u16::MAX));
        self
    }

    pub fn to_json(&self) -> Value {
        // Only plain fields, serialization can not fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
