//! cici - keep CI secrets encrypted in source control.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cici::cli::output;
use cici::cli::{execute, Cli};
use cici::core::constants;
use cici::error::{ConfigError, Error, KeyError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV_VAR).unwrap_or_else(|_| {
        if cli.debug {
            EnvFilter::new("cici=trace")
        } else if cli.verbose {
            EnvFilter::new("cici=debug")
        } else {
            EnvFilter::new("cici=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Config(ConfigError::Missing { .. }) => {
                Some("create .cici.yml in the project root".to_string())
            }
            Error::Key(KeyError::Mismatch) => Some(format!(
                "use the pair reported by the first encryption ({} / {} on CI)",
                constants::DECRYPT_KEY_ENV_VAR,
                constants::DECRYPT_IV_ENV_VAR
            )),
            Error::Key(KeyError::EnvMissing(var)) => {
                Some(format!("export {} with the base64 value", var))
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
