//! Interpretation of the service's JSON verdict.
//!
//! All user fields are optional on the wire. A missing or ill-typed field
//! only drops the matching environment variable; it never turns a grant into
//! a failure. Field access therefore walks the raw `Value` instead of
//! deserializing into a rigid struct.

use crate::auth::error::AuthError;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::debug;

pub const ENV_USER_NAME: &str = "YUBI_USER_NAME";
pub const ENV_USER_EMAIL: &str = "YUBI_USER_EMAIL";
pub const ENV_USER_USERNAME: &str = "YUBI_USER_USERNAME";

/// User attributes extracted from a positive verdict, keyed by the fixed
/// environment variable set. A value is present only if the source field was
/// found, a string, and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEnv {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl UserEnv {
    /// Present pairs in the fixed projection order: name, email, username.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            (ENV_USER_NAME, self.name.as_deref()),
            (ENV_USER_EMAIL, self.email.as_deref()),
            (ENV_USER_USERNAME, self.username.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    }

    fn from_user(user: Option<&Map<String, Value>>) -> Self {
        let Some(user) = user else {
            return Self::default();
        };

        let field = |key: &str| {
            user.get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        // A name is either "first last" or the first name alone; a lone last
        // name is never emitted.
        let name = match (field("first_name"), field("last_name")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first),
            _ => None,
        };

        Self {
            name,
            email: field("email"),
            username: field("username"),
        }
    }
}

/// Interpret a completed exchange.
///
/// # Errors
/// - `Protocol` for any status other than 200 (a rejection, per the service
///   contract);
/// - `MalformedResponse` when a 200 body is not valid JSON;
/// - `Denied` when the verdict does not carry `authenticated: true`.
pub fn interpret(status: StatusCode, body: &[u8]) -> Result<UserEnv, AuthError> {
    if status != StatusCode::OK {
        return Err(AuthError::Protocol { status });
    }

    let verdict: Value =
        serde_json::from_slice(body).map_err(|source| AuthError::MalformedResponse {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        })?;

    if !verdict
        .get("authenticated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let reason = verdict
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("authentication failed")
            .to_string();
        return Err(AuthError::Denied { reason });
    }

    let user = verdict.get("user").and_then(Value::as_object);
    if user.is_none() {
        debug!("user object not found in response");
    }

    Ok(UserEnv::from_user(user))
}
