use std::process::ExitCode;
use yubiapp_auth::cli::{self, shell::ShellHost};
use yubiapp_auth::host::{self, LoginStatus};

fn main() -> ExitCode {
    let invocation = match cli::start() {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let mut shell = ShellHost::from_stdio();
    match host::authenticate_with_config(&mut shell, &invocation.module_args, &invocation.config) {
        LoginStatus::Success => ExitCode::SUCCESS,
        LoginStatus::AuthFailure => ExitCode::from(1),
        LoginStatus::SystemFailure => ExitCode::from(2),
    }
}
