use crate::auth::error::AuthError;
use std::fmt;

/// Weak sanity floor for a YubiKey passcode. Real OTP validation happens on
/// the service side; this only rejects obviously truncated input before any
/// network activity.
pub const MIN_OTP_LEN: usize = 12;

/// A passcode that has passed the length check.
///
/// Requests are only constructible from an `Otp`, so nothing reaches the
/// wire without the floor applied.
#[derive(Clone, Copy)]
pub struct Otp<'a>(&'a str);

impl<'a> Otp<'a> {
    /// # Errors
    /// Returns `AuthError::CredentialFormat` if the passcode is shorter than
    /// [`MIN_OTP_LEN`] bytes.
    pub fn new(raw: &'a str) -> Result<Self, AuthError> {
        if raw.len() < MIN_OTP_LEN {
            return Err(AuthError::CredentialFormat { length: raw.len() });
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

// Keep the passcode out of debug output.
impl fmt::Debug for Otp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Otp(..)")
    }
}
