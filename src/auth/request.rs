use crate::auth::error::AuthError;
use crate::auth::otp::Otp;
use serde::Serialize;

/// Permission checked by the service when the module is not configured with
/// one.
pub const DEFAULT_PERMISSION: &str = "yubiapp:authenticate";

const DEVICE_TYPE: &str = "yubikey";

/// Wire payload for the device authentication endpoint.
///
/// Field order matches the wire contract; an empty permission omits the key
/// entirely.
#[derive(Serialize)]
pub struct DeviceAuthRequest<'a> {
    device_type: &'static str,
    auth_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission: Option<&'a str>,
}

impl<'a> DeviceAuthRequest<'a> {
    #[must_use]
    pub fn new(otp: Otp<'a>, permission: &'a str) -> Self {
        Self {
            device_type: DEVICE_TYPE,
            auth_code: otp.as_str(),
            permission: (!permission.is_empty()).then_some(permission),
        }
    }

    /// # Errors
    /// Returns an error if the payload cannot be serialized.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AuthError> {
        serde_json::to_vec(self).map_err(AuthError::Encode)
    }
}
