//! Authentication pipeline: validate the passcode, exchange it with the
//! YubiApp service, and classify the verdict.
//!
//! One [`Authenticator`] performs one exchange. The flow is strictly linear:
//! build the request, drive the transport and its response buffer, interpret
//! the verdict, classify. Nothing is retried and nothing is kept between
//! calls.

pub mod error;
pub mod otp;
pub mod request;
pub mod verdict;

use crate::auth::error::AuthError;
use crate::auth::otp::Otp;
use crate::auth::request::DeviceAuthRequest;
use crate::auth::verdict::{interpret, UserEnv};
use crate::transport::{sink::BodyBuffer, HttpTransport, ServiceConfig};
use secrecy::{ExposeSecret, SecretString};

/// Result of one authentication exchange, the only value that crosses the
/// boundary to the host framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The service vouched for the credential; carries the user attributes
    /// to project into the login environment.
    Granted(UserEnv),
    /// The credential or permission was rejected.
    Denied(String),
    /// The exchange could not be completed.
    SystemError(String),
}

/// Client for the device authentication endpoint.
pub struct Authenticator {
    transport: HttpTransport,
    max_response_bytes: usize,
}

impl Authenticator {
    /// # Errors
    /// Returns an error if the configured URL does not parse or the HTTP
    /// client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, AuthError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Run one exchange and collapse the result onto the three-way outcome.
    pub async fn authenticate(&self, otp: &SecretString, permission: &str) -> AuthOutcome {
        match self.exchange(otp, permission).await {
            Ok(env) => AuthOutcome::Granted(env),
            Err(err) => err.into_outcome(),
        }
    }

    async fn exchange(&self, otp: &SecretString, permission: &str) -> Result<UserEnv, AuthError> {
        let otp = Otp::new(otp.expose_secret())?;
        let payload = DeviceAuthRequest::new(otp, permission).to_bytes()?;

        let mut body = BodyBuffer::with_limit(self.max_response_bytes);
        let status = self.transport.post(&payload, &mut body).await?;

        interpret(status, &body.into_bytes())
    }
}
