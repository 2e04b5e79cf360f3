use super::transport::{BridgeTransport, DynFuture, TransportError, TransportResult};
use hyper::client::HttpConnector;
use hyper::{header, Body, Client, Method, Request};
#[allow(unused_imports)]
use log::{debug, error, info};
use serde_json::Value;
use std::time::Duration;

/// Plain HTTP transport, as used by the local bridge API. Has no TLS support.
pub struct HyperTransport {
    client: Client<HttpConnector>,
    timeout: Duration,
}

impl HyperTransport {
    pub fn new(timeout: Duration) -> HyperTransport {
        HyperTransport {
            client: Client::new(),
            timeout,
        }
    }

    async fn request(&self, method: Method, url: &str, body: Option<Value>) -> TransportResult {
        if url.starts_with("https:") {
            return Err(TransportError::Request(format!(
                "HTTPS is not supported: {}",
                url
            )));
        }
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let req = Request::builder()
            .method(method.clone())
            .uri(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| TransportError::DriverError(Box::new(e)))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(TransportError::Status(status.as_u16()));
            }
            let bytes = hyper::body::to_bytes(resp.into_body())
                .await
                .map_err(|e| TransportError::DriverError(Box::new(e)))?;
            Ok(serde_json::from_slice(&bytes)?)
        };
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(res) => {
                if let Err(e) = &res {
                    error!("{} {} failed: {}", method, url, e);
                }
                res
            }
            Err(_) => {
                error!("{} {} timed out after {:?}", method, url, self.timeout);
                Err(TransportError::Timeout)
            }
        }
    }
}

impl BridgeTransport for HyperTransport {
    fn get<'a>(&'a self, url: &'a str) -> DynFuture<'a, TransportResult> {
        debug!("GET {}", url);
        Box::pin(self.request(Method::GET, url, None))
    }

    fn put<'a>(&'a self, url: &'a str, body: Value) -> DynFuture<'a, TransportResult> {
        debug!("PUT {} {}", url, body);
        Box::pin(self.request(Method::PUT, url, Some(body)))
    }
}
