use crate::bridge::client::Hue;
use crate::bridge::config::HueConfig;
use crate::bridge::response::{GroupActionConfirmation, StateChangeConfirmation};
use crate::bridge::simulator::{BridgeSimulator, SimRequest};
use crate::bridge::states::{Alert, Effect};
use crate::bridge::transport::TransportError;
use crate::color::gamut::GAMUT_C;
use crate::color::{ColorEngine, ColorInput, XyPoint};
use crate::error::BridgeError;
use futures::executor::block_on;
use serde_json::{json, Value};
use std::sync::Arc;

const IP: &str = "localhost";
const KEY: &str = "testapp";
const BASE_URL: &str = "http://localhost/api/testapp";

const COLOR_RED: [f64; 2] = [0.6484272236872118, 0.330856101472778];

fn light_state_path(index: u32) -> String {
    format!("{}/lights/{}/state", BASE_URL, index)
}

fn group_action_path(index: u32) -> String {
    format!("{}/groups/{}/action", BASE_URL, index)
}

fn state_change(lamp: u32, attr: &str, value: Value) -> StateChangeConfirmation {
    StateChangeConfirmation {
        attribute: format!("/lights/{}/state/{}", lamp, attr),
        value,
    }
}

fn group_action(group: u32, attr: &str, value: Value) -> GroupActionConfirmation {
    GroupActionConfirmation {
        address: format!("/groups/{}/action/{}", group, attr),
        value,
    }
}

fn setup(config: HueConfig) -> (Hue, Arc<BridgeSimulator>) {
    let sim = Arc::new(BridgeSimulator::new(IP, KEY));
    sim.add_lamp(1, "Hue Lamp 1", true);
    sim.add_lamp(2, "Hue Lamp 2", true);
    sim.add_lamp(3, "Hue Lamp 3", false);
    let hue = Hue::new(config, Box::new(sim.clone()));
    (hue, sim)
}

fn default_setup() -> (Hue, Arc<BridgeSimulator>) {
    setup(HueConfig::new(IP, KEY))
}

fn last_put(sim: &BridgeSimulator) -> (String, Value) {
    match sim.last_request() {
        Some(SimRequest {
            method: "PUT",
            url,
            body: Some(body),
        }) => (url, body),
        r => panic!("Expected PUT, got {:?}", r),
    }
}

#[test]
fn test_urls() {
    let (hue, _) = default_setup();
    assert_eq!(hue.lamps_url(), format!("{}/lights", BASE_URL));
    assert_eq!(hue.lamp_url(2), format!("{}/lights/2", BASE_URL));
    assert_eq!(hue.lamp_state_url(2), light_state_path(2));
    assert_eq!(hue.group_action_url(0), group_action_path(0));
}

#[test]
fn test_init_with_retrieval() {
    let mut config = HueConfig::new(IP, KEY);
    config.retrieve_initial_state = true;
    config.number_of_lamps = 4;
    let (mut hue, sim) = setup(config);
    block_on(hue.init()).unwrap();
    let states = hue.cached_lamp_states();
    assert_eq!(states.len(), 4);
    assert_eq!(states[0].as_ref().unwrap().bri, Some(254));
    assert_eq!(states[2].as_ref().unwrap().reachable, Some(false));
    // Lamp 4 does not exist
    assert!(states[3].is_none());
    assert_eq!(sim.requests().len(), 4);
}

#[test]
fn test_init_without_retrieval() {
    let (mut hue, sim) = default_setup();
    block_on(hue.init()).unwrap();
    assert!(hue.cached_lamp_states().is_empty());
    assert!(sim.requests().is_empty());
}

#[test]
fn test_turn_on_off() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.turn_off(1)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(1, "on", json!(false))]);
    assert_eq!(last_put(&sim), (light_state_path(1), json!({"on": false})));
    assert_eq!(sim.lamp_state(1).unwrap().on, Some(false));

    let resp = block_on(hue.turn_on(1)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(1, "on", json!(true))]);
}

#[test]
fn test_turn_on_off_all() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.turn_off_all()).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "on", json!(false))]);
    assert_eq!(last_put(&sim), (group_action_path(0), json!({"on": false})));
    assert_eq!(sim.lamp_state(2).unwrap().on, Some(false));

    let resp = block_on(hue.turn_on_all()).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "on", json!(true))]);
    assert_eq!(sim.lamp_state(3).unwrap().on, Some(true));
}

#[test]
fn test_flash() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.flash(1)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(1, "alert", json!("select"))]);
    let resp = block_on(hue.long_flash(2)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(2, "alert", json!("lselect"))]);
    assert_eq!(sim.lamp_state(2).unwrap().alert, Some(Alert::LSelect));

    let resp = block_on(hue.flash_all()).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "alert", json!("select"))]);
    let resp = block_on(hue.long_flash_all()).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "alert", json!("lselect"))]);
}

#[test]
fn test_set_color() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.set_color(1, &ColorInput::Hex("FF0000".to_string()))).unwrap();
    let (url, body) = last_put(&sim);
    assert_eq!(url, light_state_path(1));
    assert_eq!(body["transitiontime"], json!(4));
    let xy = body["xy"].as_array().unwrap();
    assert!((xy[0].as_f64().unwrap() - COLOR_RED[0]).abs() < 1e-9);
    assert!((xy[1].as_f64().unwrap() - COLOR_RED[1]).abs() < 1e-9);
    assert_eq!(resp.changed_states.len(), 2);
    // Confirmed in the order they were sent
    assert_eq!(resp.changed_states[0].attribute, "/lights/1/state/xy");
    assert_eq!(resp.changed_states[1].attribute, "/lights/1/state/transitiontime");
}

#[test]
fn test_set_color_named_and_xy() {
    let (hue, sim) = default_setup();
    block_on(hue.set_color(2, &ColorInput::Named("RED".to_string()))).unwrap();
    let (_, named) = last_put(&sim);
    let red = XyPoint::from(COLOR_RED);
    block_on(hue.set_color_xy(2, red)).unwrap();
    let (_, direct) = last_put(&sim);
    let close = |a: &Value, b: &Value| (a.as_f64().unwrap() - b.as_f64().unwrap()).abs() < 1e-9;
    assert!(close(&named["xy"][0], &direct["xy"][0]));
    assert!(close(&named["xy"][1], &direct["xy"][1]));
    assert_eq!(sim.lamp_state(2).unwrap().xy, Some(red));
}

#[test]
fn test_set_color_invalid() {
    let (hue, sim) = default_setup();
    match block_on(hue.set_color(1, &ColorInput::Hex("0000f".to_string()))) {
        Err(BridgeError::Color(_)) => {}
        r => panic!("Expected color error, got {:?}", r),
    }
    // Nothing is sent
    assert!(sim.requests().is_empty());
}

#[test]
fn test_set_all_colors() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.set_all_colors(&ColorInput::Named("white".to_string()))).unwrap();
    let (url, body) = last_put(&sim);
    assert_eq!(url, group_action_path(0));
    let xy = body["xy"].as_array().unwrap();
    assert!((xy[0].as_f64().unwrap() - 0.33618074375880236).abs() < 1e-9);
    assert!((xy[1].as_f64().unwrap() - 0.3603696362840742).abs() < 1e-9);
    assert!(resp
        .acknowledged_actions
        .iter()
        .any(|a| a.address == "/groups/0/action/xy"));
}

#[test]
fn test_random_color() {
    let (hue, sim) = default_setup();
    block_on(hue.set_color(1, &ColorInput::Random)).unwrap();
    let (_, body) = last_put(&sim);
    let xy: XyPoint = serde_json::from_value(body["xy"].clone()).unwrap();
    let gamut = hue.colors().gamut();
    assert!(gamut.contains(&xy));
}

#[test]
fn test_color_temperature() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.set_color_temperature(1, 2700.0)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(1, "ct", json!(370))]);
    // Clamped to 2000 - 6000 K
    block_on(hue.set_color_temperature(1, 1000.0)).unwrap();
    assert_eq!(last_put(&sim).1, json!({"ct": 500}));
    block_on(hue.set_color_temperature(1, 10000.0)).unwrap();
    assert_eq!(last_put(&sim).1, json!({"ct": 166}));
}

#[test]
fn test_color_temperature_not_finite() {
    let (hue, sim) = default_setup();
    for kelvin in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        match block_on(hue.set_color_temperature(1, kelvin)) {
            Err(BridgeError::InvalidValue(_)) => {}
            r => panic!("Expected invalid value for {}, got {:?}", kelvin, r),
        }
    }
    assert!(sim.requests().is_empty());
    assert_eq!(sim.lamp_state(1).unwrap().ct, Some(366));
}

#[test]
fn test_brightness() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.set_brightness(1, 100)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(1, "bri", json!(100))]);
    assert_eq!(block_on(hue.get_brightness(1)).unwrap(), 100);

    let resp = block_on(hue.set_all_brightness(1)).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "bri", json!(1))]);
    assert_eq!(block_on(hue.get_brightness(2)).unwrap(), 1);

    block_on(hue.set_group_brightness(0, 254)).unwrap();
    assert_eq!(last_put(&sim).0, group_action_path(0));
}

#[test]
fn test_dim_brighten() {
    let (hue, sim) = default_setup();
    block_on(hue.dim(1, None)).unwrap();
    assert_eq!(last_put(&sim).1, json!({"bri_inc": -10}));
    assert_eq!(block_on(hue.get_brightness(1)).unwrap(), 244);

    block_on(hue.brighten(1, Some(-4))).unwrap();
    assert_eq!(last_put(&sim).1, json!({"bri_inc": 4}));
    assert_eq!(block_on(hue.get_brightness(1)).unwrap(), 248);

    let resp = block_on(hue.dim_all(Some(100))).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "bri_inc", json!(-100))]);
    let resp = block_on(hue.brighten_all(None)).unwrap();
    assert_eq!(resp.acknowledged_actions, vec![group_action(0, "bri_inc", json!(10))]);
    assert_eq!(block_on(hue.get_brightness(2)).unwrap(), 164);
}

#[test]
fn test_effects() {
    let (hue, sim) = default_setup();
    let resp = block_on(hue.start_color_loop(3)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(3, "effect", json!("colorloop"))]);
    assert_eq!(sim.lamp_state(3).unwrap().effect, Some(Effect::ColorLoop));
    let resp = block_on(hue.stop_effect(3)).unwrap();
    assert_eq!(resp.changed_states, vec![state_change(3, "effect", json!("none"))]);
}

#[test]
fn test_get_lamps() {
    let (hue, _) = default_setup();
    let lamps = block_on(hue.get_lamps()).unwrap();
    assert_eq!(lamps.len(), 3);
    assert_eq!(lamps[0].lamp_index, 1);
    assert_eq!(lamps[2].lamp_index, 3);
    assert_eq!(lamps[1].name, "Hue Lamp 2");

    // Lamp 3 is unreachable
    let states = block_on(hue.get_lamp_states()).unwrap();
    assert_eq!(states.len(), 2);

    let state = block_on(hue.get_lamp_state(2)).unwrap();
    assert_eq!(state.on, Some(true));
}

#[test]
fn test_missing_lamp() {
    let (hue, _) = default_setup();
    match block_on(hue.get_lamp_state(9)) {
        Err(BridgeError::UnexpectedResponse(_)) => {}
        r => panic!("Expected unexpected response, got {:?}", r),
    }
    let resp = block_on(hue.turn_on(9)).unwrap();
    assert!(resp.changed_states.is_empty());
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(resp.errors[0].kind, 3);
}

#[test]
fn test_offline() {
    let (hue, sim) = default_setup();
    sim.set_offline(true);
    match block_on(hue.turn_on(1)) {
        Err(BridgeError::Transport(TransportError::Timeout)) => {}
        r => panic!("Expected timeout, got {:?}", r),
    }
}

#[test]
fn test_settings() {
    let (mut hue, _) = default_setup();
    assert_eq!(hue.transition_time(), 400);
    hue.set_transition_time(1000);
    assert_eq!(hue.transition_time(), 1000);
    assert_eq!(hue.number_of_lamps(), 3);
    hue.set_number_of_lamps(5);
    assert_eq!(hue.config().number_of_lamps, 5);
}

#[test]
fn test_other_gamut() {
    let (hue, sim) = default_setup();
    let hue = hue.with_colors(ColorEngine::new().with_gamut(GAMUT_C));
    block_on(hue.set_color(1, &ColorInput::Hex("0000FF".to_string()))).unwrap();
    let xy: XyPoint = serde_json::from_value(last_put(&sim).1["xy"].clone()).unwrap();
    // Pure blue is outside gamut C too
    assert!((xy.x - GAMUT_C.blue.x).abs() < 0.05);
    assert_ne!(xy, XyPoint::new(0.167, 0.04));
}
