use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub type DynFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type TransportResult = Result<Value, TransportError>;

#[derive(Debug)]
pub enum TransportError {
    /// The request could not be built, e.g. invalid URL
    Request(String),
    Timeout,
    /// Bridge answered with a non-success HTTP status
    Status(u16),
    Json(serde_json::Error),
    DriverError(Box<dyn Error + Send + Sync>),
}

impl Error for TransportError {}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Request(msg) => write!(f, "Invalid request: {}", msg),
            TransportError::Timeout => write!(f, "Timeout"),
            TransportError::Status(code) => write!(f, "HTTP status {}", code),
            TransportError::Json(err) => write!(f, "Invalid JSON: {}", err),
            TransportError::DriverError(err) => write!(f, "{}", err),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> TransportError {
        TransportError::Json(err)
    }
}

/// HTTP access to a bridge. Both calls return the parsed JSON body.
pub trait BridgeTransport: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> DynFuture<'a, TransportResult>;

    fn put<'a>(&'a self, url: &'a str, body: Value) -> DynFuture<'a, TransportResult>;
}

impl<T> BridgeTransport for Box<T>
where
    T: BridgeTransport + ?Sized,
{
    fn get<'a>(&'a self, url: &'a str) -> DynFuture<'a, TransportResult> {
        (**self).get(url)
    }

    fn put<'a>(&'a self, url: &'a str, body: Value) -> DynFuture<'a, TransportResult> {
        (**self).put(url, body)
    }
}

impl<T> BridgeTransport for std::sync::Arc<T>
where
    T: BridgeTransport + ?Sized,
{
    fn get<'a>(&'a self, url: &'a str) -> DynFuture<'a, TransportResult> {
        (**self).get(url)
    }

    fn put<'a>(&'a self, url: &'a str, body: Value) -> DynFuture<'a, TransportResult> {
        (**self).put(url, body)
    }
}
