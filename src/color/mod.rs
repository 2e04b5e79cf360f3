pub mod convert;
pub mod css;
pub mod engine;
pub mod gamut;
pub mod rgb;
pub mod temperature;
pub mod xy;

pub use css::{ColorNames, CssColors};
pub use engine::{ColorEngine, ColorInput};
pub use gamut::Gamut;
pub use rgb::Rgb;
pub use xy::XyPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    InvalidHex(String),
    UnknownName(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        match self {
            ColorError::InvalidHex(s) => write!(fmt, "Invalid hex color '{}', expected six hex digits", s),
            ColorError::UnknownName(s) => write!(fmt, "Unknown color name '{}'", s),
        }
    }
}

impl std::error::Error for ColorError {}
