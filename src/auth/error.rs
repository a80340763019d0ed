use crate::auth::AuthOutcome;
use crate::transport::sink::SinkError;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during one authentication exchange.
///
/// Each variant classifies as either a denial or an infrastructure failure;
/// the split is fixed by [`AuthError::into_outcome`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The passcode is below the minimum length. Fails before any network
    /// activity.
    #[error("invalid OTP format (too short)")]
    CredentialFormat { length: usize },

    /// The configured service URL does not parse.
    #[error("invalid service URL: {0}")]
    Config(#[from] url::ParseError),

    /// The request payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// DNS, connect, TLS, timeout, or any other network-layer failure.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response buffer rejected a chunk; the transfer was aborted.
    #[error(transparent)]
    Buffer(#[from] SinkError),

    /// The service answered with a status other than 200. Treated as a
    /// rejection, not an infrastructure fault: the service signals genuine
    /// denials at the HTTP layer and never returns non-JSON errors in-band.
    #[error("HTTP error: {status}")]
    Protocol { status: StatusCode },

    /// A 200 response whose body is not valid JSON.
    #[error("failed to parse JSON response: {source}; body: {body}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// A well-formed verdict with `authenticated` false or absent.
    #[error("{reason}")]
    Denied { reason: String },
}

impl AuthError {
    /// Collapse onto the three-way outcome the host framework understands.
    ///
    /// Transport failures keep their specific cause in the diagnostic text
    /// even though the outcome category is uniform.
    #[must_use]
    pub fn into_outcome(self) -> AuthOutcome {
        match self {
            err @ (Self::CredentialFormat { .. } | Self::Protocol { .. }) => {
                AuthOutcome::Denied(err.to_string())
            }
            Self::Denied { reason } => AuthOutcome::Denied(reason),
            Self::Transport(err) => AuthOutcome::SystemError(describe_transport(&err)),
            err @ (Self::Config(_)
            | Self::Encode(_)
            | Self::Buffer(_)
            | Self::MalformedResponse { .. }) => AuthOutcome::SystemError(err.to_string()),
        }
    }
}

fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_format_is_a_denial() {
        let outcome = AuthError::CredentialFormat { length: 5 }.into_outcome();
        assert_eq!(
            outcome,
            AuthOutcome::Denied("invalid OTP format (too short)".to_string())
        );
    }

    #[test]
    fn non_200_status_is_a_denial() {
        let outcome = AuthError::Protocol {
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
        .into_outcome();
        assert!(matches!(outcome, AuthOutcome::Denied(_)));
    }

    #[test]
    fn verdict_denial_carries_the_service_reason() {
        let outcome = AuthError::Denied {
            reason: "replayed OTP".to_string(),
        }
        .into_outcome();
        assert_eq!(outcome, AuthOutcome::Denied("replayed OTP".to_string()));
    }

    #[test]
    fn malformed_response_is_a_system_error() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let outcome = AuthError::MalformedResponse {
            source,
            body: "{".to_string(),
        }
        .into_outcome();
        match outcome {
            AuthOutcome::SystemError(reason) => {
                assert!(reason.contains("failed to parse JSON response"));
                assert!(reason.contains('{'));
            }
            other => panic!("expected SystemError, got {other:?}"),
        }
    }

    #[test]
    fn buffer_overflow_is_a_system_error() {
        let outcome = AuthError::Buffer(SinkError::Overflow { limit: 16 }).into_outcome();
        assert!(matches!(outcome, AuthOutcome::SystemError(_)));
    }
}
