//! Boundary with the host login framework.
//!
//! The framework owns the login ceremony: it prompts for the passcode,
//! receives `NAME=value` environment pairs, and consumes one of three result
//! codes. Those callbacks are modeled by [`LoginHost`]; the pipeline's
//! outcome is translated into the framework vocabulary here and nowhere
//! else. Environment mutation and host-visible log lines happen only in this
//! module, after the verdict is classified.

use crate::auth::request::DEFAULT_PERMISSION;
use crate::auth::verdict::UserEnv;
use crate::auth::{AuthOutcome, Authenticator};
use crate::transport::ServiceConfig;
use anyhow::Result;
use secrecy::SecretString;

/// Result codes understood by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    Success,
    AuthFailure,
    SystemFailure,
}

/// Severity for host-visible log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

/// Callbacks supplied by the host framework.
pub trait LoginHost {
    /// Prompt the user for the passcode, echo disabled.
    ///
    /// # Errors
    /// Returns an error if no passcode can be obtained; authentication is
    /// then refused without touching the network.
    fn prompt_secret(&mut self, prompt: &str) -> Result<SecretString>;

    /// Inject one `NAME=value` pair into the login environment.
    ///
    /// # Errors
    /// Returns an error if the pair cannot be injected.
    fn put_env(&mut self, pair: &str) -> Result<()>;

    /// Emit a diagnostic line through the framework's log sink.
    fn log(&mut self, level: LogLevel, message: &str);
}

/// Module configuration: only `permission=<value>` is recognized; later
/// occurrences win and anything else is ignored.
fn permission_from_args(args: &[String]) -> String {
    args.iter()
        .filter_map(|arg| arg.strip_prefix("permission="))
        .last()
        .unwrap_or(DEFAULT_PERMISSION)
        .to_string()
}

/// Authenticate against the stock endpoint.
pub fn authenticate(host: &mut dyn LoginHost, args: &[String]) -> LoginStatus {
    authenticate_with_config(host, args, &ServiceConfig::default())
}

/// Authenticate against a specific service configuration.
///
/// One synchronous exchange per call: prompt, request, verdict, projection.
/// The calling thread blocks for the duration, bounded by the configured
/// timeouts; the exchange itself runs on a fresh current-thread runtime.
pub fn authenticate_with_config(
    host: &mut dyn LoginHost,
    args: &[String],
    config: &ServiceConfig,
) -> LoginStatus {
    let permission = permission_from_args(args);
    host.log(
        LogLevel::Info,
        &format!("starting authentication with permission: {permission}"),
    );

    let otp = match host.prompt_secret("Yubikey OTP: ") {
        Ok(otp) => otp,
        Err(err) => {
            host.log(LogLevel::Error, &format!("failed to get OTP from user: {err}"));
            return LoginStatus::AuthFailure;
        }
    };

    let authenticator = match Authenticator::new(config) {
        Ok(authenticator) => authenticator,
        Err(err) => {
            host.log(LogLevel::Error, &err.to_string());
            return LoginStatus::SystemFailure;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            host.log(LogLevel::Error, &format!("failed to start runtime: {err}"));
            return LoginStatus::SystemFailure;
        }
    };

    match runtime.block_on(authenticator.authenticate(&otp, &permission)) {
        AuthOutcome::Granted(env) => {
            if let Err(err) = project_env(host, &env) {
                host.log(
                    LogLevel::Error,
                    &format!("failed to export user attributes: {err}"),
                );
                return LoginStatus::SystemFailure;
            }
            host.log(LogLevel::Info, "authentication successful");
            LoginStatus::Success
        }
        AuthOutcome::Denied(reason) => {
            host.log(LogLevel::Error, &format!("authentication failed: {reason}"));
            LoginStatus::AuthFailure
        }
        AuthOutcome::SystemError(reason) => {
            host.log(LogLevel::Error, &reason);
            LoginStatus::SystemFailure
        }
    }
}

/// Export granted attributes in the fixed key order, warning about the ones
/// the verdict did not carry.
fn project_env(host: &mut dyn LoginHost, env: &UserEnv) -> Result<()> {
    for (key, value) in env.iter() {
        host.put_env(&format!("{key}={value}"))?;
        host.log(LogLevel::Info, &format!("set {key}={value}"));
    }

    if env.name.is_none() {
        host.log(LogLevel::Warning, "user name not found in response");
    }
    if env.email.is_none() {
        host.log(LogLevel::Warning, "user email not found in response");
    }
    if env.username.is_none() {
        host.log(LogLevel::Warning, "user username not found in response");
    }

    Ok(())
}

// The remaining lifecycle hooks have no work to do here; the framework still
// expects a result code from each.

pub fn account_management(_host: &mut dyn LoginHost, _args: &[String]) -> LoginStatus {
    LoginStatus::Success
}

pub fn open_session(_host: &mut dyn LoginHost, _args: &[String]) -> LoginStatus {
    LoginStatus::Success
}

pub fn close_session(_host: &mut dyn LoginHost, _args: &[String]) -> LoginStatus {
    LoginStatus::Success
}

pub fn set_credentials(_host: &mut dyn LoginHost, _args: &[String]) -> LoginStatus {
    LoginStatus::Success
}

pub fn change_auth_token(_host: &mut dyn LoginHost, _args: &[String]) -> LoginStatus {
    LoginStatus::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Default)]
    struct FakeHost {
        otp: Option<String>,
        env: Vec<String>,
        logs: Vec<(LogLevel, String)>,
    }

    impl LoginHost for FakeHost {
        fn prompt_secret(&mut self, _prompt: &str) -> Result<SecretString> {
            self.otp
                .take()
                .map(SecretString::from)
                .ok_or_else(|| anyhow!("conversation failed"))
        }

        fn put_env(&mut self, pair: &str) -> Result<()> {
            self.env.push(pair.to_string());
            Ok(())
        }

        fn log(&mut self, level: LogLevel, message: &str) {
            self.logs.push((level, message.to_string()));
        }
    }

    #[test]
    fn default_permission_when_unconfigured() {
        assert_eq!(permission_from_args(&[]), "yubiapp:authenticate");
    }

    #[test]
    fn permission_argument_is_recognized_and_the_rest_ignored() {
        let args = ["debug", "permission=yubiapp:admin", "nullok"].map(String::from);
        assert_eq!(permission_from_args(&args), "yubiapp:admin");
    }

    #[test]
    fn last_permission_argument_wins() {
        let args = ["permission=yubiapp:read", "permission=yubiapp:write"].map(String::from);
        assert_eq!(permission_from_args(&args), "yubiapp:write");
    }

    #[test]
    fn empty_permission_argument_is_kept() {
        let args = ["permission="].map(String::from);
        assert_eq!(permission_from_args(&args), "");
    }

    #[test]
    fn prompt_failure_refuses_authentication() {
        let mut host = FakeHost::default();
        let status = authenticate_with_config(&mut host, &[], &ServiceConfig::default());
        assert_eq!(status, LoginStatus::AuthFailure);
        assert!(host.env.is_empty());
        assert!(host
            .logs
            .iter()
            .any(|(level, message)| *level == LogLevel::Error
                && message.contains("failed to get OTP")));
    }

    #[test]
    fn projection_exports_in_fixed_order_and_warns_about_gaps() {
        let env = {
            let verdict = serde_json::json!({
                "authenticated": true,
                "user": {"first_name": "Ada", "username": "ada"}
            });
            crate::auth::verdict::interpret(
                reqwest::StatusCode::OK,
                verdict.to_string().as_bytes(),
            )
            .expect("grant")
        };

        let mut host = FakeHost::default();
        project_env(&mut host, &env).expect("projection should succeed");

        assert_eq!(
            host.env,
            vec!["YUBI_USER_NAME=Ada", "YUBI_USER_USERNAME=ada"]
        );
        assert!(host
            .logs
            .iter()
            .any(|(level, message)| *level == LogLevel::Warning
                && message.contains("user email not found")));
    }

    #[test]
    fn lifecycle_hooks_always_succeed() {
        let mut host = FakeHost::default();
        assert_eq!(account_management(&mut host, &[]), LoginStatus::Success);
        assert_eq!(open_session(&mut host, &[]), LoginStatus::Success);
        assert_eq!(close_session(&mut host, &[]), LoginStatus::Success);
        assert_eq!(set_credentials(&mut host, &[]), LoginStatus::Success);
        assert_eq!(change_auth_token(&mut host, &[]), LoginStatus::Success);
    }
}
