use super::config::HueConfig;
use super::response::{GroupActionResponse, StateChangeResponse};
use super::states::{Alert, Effect, Lamp, LampState, StateUpdate};
use super::transport::BridgeTransport;
use crate::color::temperature::clamp_to_range;
use crate::color::{ColorEngine, ColorInput, XyPoint};
use crate::error::BridgeError;
use futures::future::join_all;
#[allow(unused_imports)]
use log::{debug, error, info};
use serde_json::Value;

/// Group containing all lamps
pub const ALL_LAMPS: u32 = 0;

pub const MIN_COLOR_TEMPERATURE: f64 = 2000.0;
pub const MAX_COLOR_TEMPERATURE: f64 = 6000.0;

/// Control of the lamps connected to one bridge
pub struct Hue {
    config: HueConfig,
    base_api_url: String,
    transport: Box<dyn BridgeTransport>,
    colors: ColorEngine,
    lamp_states: Vec<Option<LampState>>,
}

impl Hue {
    pub fn new(config: HueConfig, transport: Box<dyn BridgeTransport>) -> Hue {
        let base_api_url = config.base_api_url();
        Hue {
            config,
            base_api_url,
            transport,
            colors: ColorEngine::new(),
            lamp_states: Vec::new(),
        }
    }

    /// Use another color engine, e.g. one with a different gamut
    pub fn with_colors(mut self, colors: ColorEngine) -> Hue {
        self.colors = colors;
        self
    }

    /// Fetch the state of all configured lamps if `retrieve_initial_state`
    /// is set. Lamps that can not be queried are left as `None`.
    pub async fn init(&mut self) -> Result<(), BridgeError> {
        if !self.config.retrieve_initial_state {
            return Ok(());
        }
        let this = &*self;
        let queries = (1..=this.config.number_of_lamps).map(move |i| this.get_lamp_state(i));
        let results = join_all(queries).await;
        let mut states = Vec::with_capacity(results.len());
        for (i, res) in results.into_iter().enumerate() {
            match res {
                Ok(state) => states.push(Some(state)),
                Err(e) => {
                    error!("Failed to get initial state of lamp {}: {}", i + 1, e);
                    states.push(None);
                }
            }
        }
        info!("Retrieved state of {} lamp(s)", states.len());
        self.lamp_states = states;
        Ok(())
    }

    /// States collected by [`init`](Self::init), index 0 is lamp 1
    pub fn cached_lamp_states(&self) -> &[Option<LampState>] {
        &self.lamp_states
    }

    pub fn lamps_url(&self) -> String {
        format!("{}/lights", self.base_api_url)
    }

    pub fn lamp_url(&self, lamp_index: u32) -> String {
        format!("{}/{}", self.lamps_url(), lamp_index)
    }

    pub fn lamp_state_url(&self, lamp_index: u32) -> String {
        format!("{}/state", self.lamp_url(lamp_index))
    }

    pub fn group_action_url(&self, group_index: u32) -> String {
        format!("{}/groups/{}/action", self.base_api_url, group_index)
    }

    async fn get(&self, url: &str) -> Result<Value, BridgeError> {
        Ok(self.transport.get(url).await?)
    }

    async fn put_state(
        &self,
        lamp_index: u32,
        update: StateUpdate,
    ) -> Result<StateChangeResponse, BridgeError> {
        let url = self.lamp_state_url(lamp_index);
        let data = self.transport.put(&url, update.to_json()).await?;
        let resp = StateChangeResponse::from_json(&data);
        for e in &resp.errors {
            error!("{}", e);
        }
        Ok(resp)
    }

    async fn put_group_action(
        &self,
        group_index: u32,
        update: StateUpdate,
    ) -> Result<GroupActionResponse, BridgeError> {
        let url = self.group_action_url(group_index);
        let data = self.transport.put(&url, update.to_json()).await?;
        let resp = GroupActionResponse::from_json(&data);
        for e in &resp.errors {
            error!("{}", e);
        }
        Ok(resp)
    }

    fn color_update(&self, xy: XyPoint) -> StateUpdate {
        StateUpdate::color(xy).with_transition_ms(self.config.transition_time)
    }

    /// Flash the lamp once
    pub async fn flash(&self, lamp_index: u32) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::alert(Alert::Select)).await
    }

    pub async fn flash_all(&self) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::alert(Alert::Select))
            .await
    }

    /// Flash the lamp for a longer time
    pub async fn long_flash(&self, lamp_index: u32) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::alert(Alert::LSelect))
            .await
    }

    pub async fn long_flash_all(&self) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::alert(Alert::LSelect))
            .await
    }

    /// Set the lamp to the closest color it can reproduce
    pub async fn set_color(
        &self,
        lamp_index: u32,
        color: &ColorInput,
    ) -> Result<StateChangeResponse, BridgeError> {
        let xy = self.colors.resolve(color)?;
        debug!("Lamp {} color {:?} -> {}", lamp_index, color, xy);
        self.set_color_xy(lamp_index, xy).await
    }

    pub async fn set_color_xy(
        &self,
        lamp_index: u32,
        xy: XyPoint,
    ) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, self.color_update(xy)).await
    }

    pub async fn set_all_colors(
        &self,
        color: &ColorInput,
    ) -> Result<GroupActionResponse, BridgeError> {
        let xy = self.colors.resolve(color)?;
        self.put_group_action(ALL_LAMPS, self.color_update(xy))
            .await
    }

    /// Temperature in Kelvin, limited to 2000 - 6000 K
    pub async fn set_color_temperature(
        &self,
        lamp_index: u32,
        kelvin: f64,
    ) -> Result<StateChangeResponse, BridgeError> {
        if !kelvin.is_finite() {
            return Err(BridgeError::InvalidValue(format!(
                "Color temperature {} K",
                kelvin
            )));
        }
        let kelvin = clamp_to_range(MIN_COLOR_TEMPERATURE, MAX_COLOR_TEMPERATURE, kelvin);
        let mired = self.colors.kelvin_to_mired(kelvin).floor() as u16;
        self.put_state(lamp_index, StateUpdate::color_temperature(mired))
            .await
    }

    pub async fn turn_off(&self, lamp_index: u32) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::power(false)).await
    }

    pub async fn turn_on(&self, lamp_index: u32) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::power(true)).await
    }

    pub async fn turn_off_all(&self) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::power(false))
            .await
    }

    pub async fn turn_on_all(&self) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::power(true))
            .await
    }

    /// Brightness 0 - 254. 0 is not the same as off.
    pub async fn set_brightness(
        &self,
        lamp_index: u32,
        brightness: u8,
    ) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::brightness(brightness))
            .await
    }

    pub async fn set_all_brightness(&self, brightness: u8) -> Result<GroupActionResponse, BridgeError> {
        self.set_group_brightness(ALL_LAMPS, brightness).await
    }

    pub async fn set_group_brightness(
        &self,
        group_index: u32,
        brightness: u8,
    ) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(group_index, StateUpdate::brightness(brightness))
            .await
    }

    pub async fn dim(
        &self,
        lamp_index: u32,
        decrement: Option<i32>,
    ) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::dim(decrement)).await
    }

    pub async fn dim_all(&self, decrement: Option<i32>) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::dim(decrement))
            .await
    }

    pub async fn brighten(
        &self,
        lamp_index: u32,
        increment: Option<i32>,
    ) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::brighten(increment))
            .await
    }

    pub async fn brighten_all(
        &self,
        increment: Option<i32>,
    ) -> Result<GroupActionResponse, BridgeError> {
        self.put_group_action(ALL_LAMPS, StateUpdate::brighten(increment))
            .await
    }

    pub async fn start_color_loop(
        &self,
        lamp_index: u32,
    ) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::effect(Effect::ColorLoop))
            .await
    }

    /// Stop any running effect
    pub async fn stop_effect(&self, lamp_index: u32) -> Result<StateChangeResponse, BridgeError> {
        self.put_state(lamp_index, StateUpdate::effect(Effect::None))
            .await
    }

    pub async fn get_brightness(&self, lamp_index: u32) -> Result<u8, BridgeError> {
        self.get_lamp_state(lamp_index)
            .await?
            .bri
            .ok_or_else(|| {
                BridgeError::UnexpectedResponse(format!("No brightness for lamp {}", lamp_index))
            })
    }

    pub async fn get_lamp_state(&self, lamp_index: u32) -> Result<LampState, BridgeError> {
        let data = self.get(&self.lamp_url(lamp_index)).await?;
        match data.get("state") {
            Some(state) => Ok(serde_json::from_value(state.clone())?),
            None => Err(BridgeError::UnexpectedResponse(format!(
                "No state for lamp {}: {}",
                lamp_index, data
            ))),
        }
    }

    /// All lamps known to the bridge, ordered by index
    pub async fn get_lamps(&self) -> Result<Vec<Lamp>, BridgeError> {
        let data = self.get(&self.lamps_url()).await?;
        let entries = match data {
            Value::Object(entries) => entries,
            other => {
                return Err(BridgeError::UnexpectedResponse(format!(
                    "Expected lamp listing, got {}",
                    other
                )))
            }
        };
        let mut lamps = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let mut lamp: Lamp = serde_json::from_value(value)?;
            lamp.lamp_index = key.parse().map_err(|_| {
                BridgeError::UnexpectedResponse(format!("Invalid lamp index '{}'", key))
            })?;
            lamps.push(lamp);
        }
        lamps.sort_by_key(|l| l.lamp_index);
        Ok(lamps)
    }

    /// State of the reachable lamps
    pub async fn get_lamp_states(&self) -> Result<Vec<LampState>, BridgeError> {
        let lamps = self.get_lamps().await?;
        Ok(lamps
            .into_iter()
            .filter(|l| l.state.reachable == Some(true))
            .map(|l| l.state)
            .collect())
    }

    /// In milliseconds
    pub fn transition_time(&self) -> u32 {
        self.config.transition_time
    }

    pub fn set_transition_time(&mut self, ms: u32) {
        self.config.transition_time = ms;
    }

    pub fn number_of_lamps(&self) -> u32 {
        self.config.number_of_lamps
    }

    pub fn set_number_of_lamps(&mut self, lamps: u32) {
        self.config.number_of_lamps = lamps;
    }

    pub fn colors(&self) -> &ColorEngine {
        &self.colors
    }

    pub fn config(&self) -> &HueConfig {
        &self.config
    }

    pub fn transport(&self) -> &dyn BridgeTransport {
        self.transport.as_ref()
    }
}
