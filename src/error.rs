use crate::bridge::transport::TransportError;
use crate::color::ColorError;
use std::fmt;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Failure of a bridge operation
#[derive(Debug)]
pub enum BridgeError {
    Transport(TransportError),
    Color(ColorError),
    /// Answer from the bridge did not have the expected shape
    UnexpectedResponse(String),
    /// Argument that can not be sent to a lamp
    InvalidValue(String),
}

impl std::error::Error for BridgeError {}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Transport(err) => write!(f, "Bridge communication failed: {}", err),
            BridgeError::Color(err) => write!(f, "{}", err),
            BridgeError::UnexpectedResponse(msg) => write!(f, "Unexpected response: {}", msg),
            BridgeError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl From<TransportError> for BridgeError {
    fn from(err: TransportError) -> BridgeError {
        BridgeError::Transport(err)
    }
}

impl From<ColorError> for BridgeError {
    fn from(err: ColorError) -> BridgeError {
        BridgeError::Color(err)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> BridgeError {
        BridgeError::UnexpectedResponse(err.to_string())
    }
}
