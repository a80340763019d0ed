//! HTTP exchange with the YubiApp service.
//!
//! One transport issues exactly one POST per authentication attempt. The
//! response body is streamed chunk-by-chunk into a caller-supplied
//! [`sink::BodySink`], so buffer growth policy stays independent of the HTTP
//! call. Timeouts are mandatory and come from [`ServiceConfig`]. Nothing is
//! retried here; the host framework repeats the whole login ceremony instead.

pub mod sink;

use crate::auth::error::AuthError;
use crate::transport::sink::BodySink;
use crate::APP_USER_AGENT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Endpoint served by a local YubiApp instance.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080/api/v1/auth/device";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Where and how to reach the authentication service.
///
/// Carried explicitly so tests can point the transport at a mock endpoint
/// and tighten the bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            max_response_bytes: MAX_RESPONSE_BYTES,
        }
    }
}

impl ServiceConfig {
    /// Config for `url` with the stock timeouts and bounds.
    #[must_use]
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Issues the single authentication POST.
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if the configured URL does not parse or the client
    /// cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, AuthError> {
        let url = Url::parse(&config.url)?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(AuthError::Transport)?;

        Ok(Self { client, url })
    }

    /// Send `payload` and stream the response body into `sink` in arrival
    /// order. The status code is returned once the transfer completes; a
    /// sink failure aborts the transfer.
    ///
    /// # Errors
    /// Returns `Transport` for any network-layer failure (the timeout and
    /// connection causes stay distinguishable in the error detail) and
    /// `Buffer` when the sink rejects a chunk.
    pub async fn post(
        &self,
        payload: &[u8],
        sink: &mut dyn BodySink,
    ) -> Result<StatusCode, AuthError> {
        debug!("POST {}", self.url);

        let mut response = self
            .client
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .body(payload.to_vec())
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();

        while let Some(chunk) = response.chunk().await.map_err(AuthError::Transport)? {
            sink.append(&chunk)?;
        }

        debug!("received response from service (HTTP {status})");

        Ok(status)
    }
}
