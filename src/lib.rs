//! # YubiApp authentication adapter
//!
//! Exchanges a YubiKey one-time passcode with a YubiApp service over HTTP
//! and, on a positive verdict, projects selected user attributes into the
//! login environment of the calling session.
//!
//! The host login framework owns the ceremony: it prompts for the passcode,
//! accepts `NAME=value` environment pairs, and consumes one of three result
//! codes. Those callbacks are modeled by [`host::LoginHost`]; one call to
//! [`host::authenticate`] performs one complete, stateless exchange.
//!
//! ## Pipeline
//!
//! The request builder serializes the passcode, the transport streams the
//! response into a bounded buffer, the verdict interpreter reads the JSON,
//! and the classified outcome drives the environment projection. There is no
//! retry loop and no state shared between calls; concurrent invocations for
//! different users are independent.

pub mod auth;
pub mod cli;
pub mod host;
pub mod transport;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
