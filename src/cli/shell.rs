//! Shell implementation of the host callbacks.

use crate::host::{LogLevel, LoginHost};
use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use std::io::{BufRead, Write};
use tracing::{error, info, warn};

/// Drives the login conversation on the terminal: prompts on stderr, reads
/// the passcode from stdin, and prints granted attributes as `NAME=value`
/// lines on stdout.
pub struct ShellHost<R, W> {
    input: R,
    output: W,
}

impl ShellHost<std::io::StdinLock<'static>, std::io::Stdout> {
    #[must_use]
    pub fn from_stdio() -> Self {
        Self {
            input: std::io::stdin().lock(),
            output: std::io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> ShellHost<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LoginHost for ShellHost<R, W> {
    fn prompt_secret(&mut self, prompt: &str) -> Result<SecretString> {
        eprint!("{prompt}");

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read passcode")?;
        if read == 0 {
            bail!("end of input while reading passcode");
        }

        Ok(SecretString::from(
            line.trim_end_matches(['\r', '\n']).to_string(),
        ))
    }

    fn put_env(&mut self, pair: &str) -> Result<()> {
        writeln!(self.output, "{pair}").context("failed to write environment pair")
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => error!("{message}"),
            LogLevel::Warning => warn!("{message}"),
            LogLevel::Info => info!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Cursor;

    #[test]
    fn reads_and_trims_the_passcode() {
        let mut host = ShellHost::new(Cursor::new(b"cccccccccccc\n".to_vec()), Vec::new());
        let otp = host.prompt_secret("Yubikey OTP: ").expect("line available");
        assert_eq!(otp.expose_secret(), "cccccccccccc");
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut host = ShellHost::new(Cursor::new(Vec::new()), Vec::new());
        assert!(host.prompt_secret("Yubikey OTP: ").is_err());
    }

    #[test]
    fn writes_environment_pairs() {
        let mut host = ShellHost::new(Cursor::new(Vec::new()), Vec::new());
        host.put_env("YUBI_USER_NAME=Ada Lovelace")
            .expect("write to vec");
        host.put_env("YUBI_USER_USERNAME=ada").expect("write to vec");
        assert_eq!(
            String::from_utf8(host.output).expect("utf8"),
            "YUBI_USER_NAME=Ada Lovelace\nYUBI_USER_USERNAME=ada\n"
        );
    }
}
