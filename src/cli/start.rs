use crate::cli::commands;
use crate::transport::ServiceConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Parsed invocation: where to authenticate and the module-style argument
/// list handed to the host entry point.
#[derive(Debug)]
pub struct Invocation {
    pub config: ServiceConfig,
    pub module_args: Vec<String>,
}

/// Parse the command line and install the tracing subscriber.
///
/// # Errors
/// Returns an error if required arguments are missing or the subscriber
/// cannot be installed.
pub fn start() -> Result<Invocation> {
    let matches = commands::new().get_matches();

    let verbosity_level = match matches.get_one::<u8>("verbosity").map_or(0, |&v| v) {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    let url = matches
        .get_one::<String>("url")
        .map(String::to_string)
        .ok_or_else(|| anyhow!("missing required argument: --url"))?;

    let permission = matches
        .get_one::<String>("permission")
        .map(String::to_string)
        .ok_or_else(|| anyhow!("missing required argument: --permission"))?;

    Ok(Invocation {
        config: ServiceConfig::for_url(url),
        module_args: vec![format!("permission={permission}")],
    })
}
