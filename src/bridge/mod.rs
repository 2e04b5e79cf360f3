pub mod client;
pub mod config;
pub mod discovery;
#[cfg(feature = "hyper_transport")]
pub mod hyper_transport;
pub mod response;
#[cfg(any(test, feature = "simulator"))]
pub mod simulator;
pub mod states;
pub mod transport;

#[cfg(test)]
mod test;

pub use client::Hue;
pub use config::HueConfig;
pub use transport::{BridgeTransport, TransportError};
