use super::convert;
use super::css::{ColorNames, CssColors};
use super::gamut::Gamut;
use super::rgb::Rgb;
use super::temperature;
use super::xy::XyPoint;
use super::ColorError;
use rand::Rng;

/// Color to set a lamp to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorInput {
    /// Six digit hex string, e.g. "ff6c22"
    Hex(String),
    /// CSS color name, case insensitive
    Named(String),
    /// Uniformly random RGB color
    Random,
}

/// Converts between consumer colors and the xy coordinates used by the
/// lamps, keeping the result within the gamut of the lamp.
#[derive(Debug, Clone)]
pub struct ColorEngine<N = CssColors> {
    names: N,
    gamut: Gamut,
}

impl ColorEngine<CssColors> {
    pub fn new() -> ColorEngine<CssColors> {
        ColorEngine::with_names(CssColors)
    }
}

impl Default for ColorEngine<CssColors> {
    fn default() -> Self {
        ColorEngine::new()
    }
}

impl<N: ColorNames> ColorEngine<N> {
    pub fn with_names(names: N) -> ColorEngine<N> {
        ColorEngine {
            names,
            gamut: Gamut::default(),
        }
    }

    pub fn with_gamut(mut self, gamut: Gamut) -> Self {
        self.gamut = gamut;
        self
    }

    pub fn gamut(&self) -> &Gamut {
        &self.gamut
    }

    pub fn names(&self) -> &N {
        &self.names
    }

    /// Interpret free text the way a user would expect: a known color name,
    /// otherwise a hex string. Nothing or an empty string means random.
    pub fn classify(&self, text: Option<&str>) -> ColorInput {
        match text {
            None | Some("") => ColorInput::Random,
            Some(s) => {
                if self.names.lookup(&s.to_lowercase()).is_some() {
                    ColorInput::Named(s.to_string())
                } else {
                    ColorInput::Hex(s.to_string())
                }
            }
        }
    }

    pub fn resolve(&self, input: &ColorInput) -> Result<XyPoint, ColorError> {
        self.resolve_with_rng(input, &mut rand::thread_rng())
    }

    /// Like [`resolve`](Self::resolve) but random colors are drawn from `rng`
    pub fn resolve_with_rng<R>(&self, input: &ColorInput, rng: &mut R) -> Result<XyPoint, ColorError>
    where
        R: Rng + ?Sized,
    {
        let rgb = match input {
            ColorInput::Hex(hex) => Rgb::from_hex(hex)?,
            ColorInput::Named(name) => self.named_rgb(name)?,
            ColorInput::Random => Rgb::new(rng.gen(), rng.gen(), rng.gen()),
        };
        Ok(self.rgb_to_xy(&rgb))
    }

    pub fn resolve_str(&self, text: Option<&str>) -> Result<XyPoint, ColorError> {
        self.resolve(&self.classify(text))
    }

    pub fn named_rgb(&self, name: &str) -> Result<Rgb, ColorError> {
        match self.names.lookup(&name.to_lowercase()) {
            Some(hex) => Rgb::from_hex(hex),
            None => Err(ColorError::UnknownName(name.to_string())),
        }
    }

    pub fn hex_to_xy(&self, hex: &str) -> Result<XyPoint, ColorError> {
        Ok(self.rgb_to_xy(&Rgb::from_hex(hex)?))
    }

    pub fn rgb_to_xy(&self, rgb: &Rgb) -> XyPoint {
        convert::rgb_to_xy(rgb, &self.gamut)
    }

    /// Brightness is 0.0 - 1.0
    pub fn xy_to_rgb(&self, xy: &XyPoint, brightness: f64) -> Rgb {
        convert::xy_to_rgb(xy, brightness, &self.gamut)
    }

    pub fn xy_to_hex(&self, xy: &XyPoint, brightness: f64) -> String {
        self.xy_to_rgb(xy, brightness).to_hex()
    }

    /// Point on the black body curve, moved into the gamut
    pub fn kelvin_to_xy(&self, kelvin: u32) -> XyPoint {
        self.gamut.clamp(temperature::cct_to_xy(kelvin))
    }

    pub fn kelvin_to_mired(&self, kelvin: f64) -> f64 {
        temperature::kelvin_to_mired(kelvin)
    }

    pub fn mired_to_kelvin(&self, mired: f64) -> f64 {
        temperature::mired_to_kelvin(mired)
    }
}
