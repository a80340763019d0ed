use crate::auth::request::DEFAULT_PERMISSION;
use crate::transport::DEFAULT_SERVICE_URL;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

// Named levels only; repeated -v flags cover the numeric form.
pub fn log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            other => Err(format!("unknown log level: {other}")),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("yubiapp-login")
        .about("YubiApp one-time-passcode login")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .help("Device authentication endpoint")
                .default_value(DEFAULT_SERVICE_URL)
                .env("YUBIAPP_AUTH_URL"),
        )
        .arg(
            Arg::new("permission")
                .short('P')
                .long("permission")
                .help("Permission to request, example: yubiapp:authenticate")
                .default_value(DEFAULT_PERMISSION)
                .env("YUBIAPP_PERMISSION"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("YUBIAPP_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(log_level()),
        )
}
