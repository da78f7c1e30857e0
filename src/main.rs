//! Forkful CLI entrypoint for browsing restaurant reviews.

use std::io::{self, Write};
use std::process::ExitCode;

use forkful::{ForkfulConfig, ReviewSourceError};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ReviewSourceError> {
    let config = load_config()?;
    cli::browse::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ReviewSourceError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<ForkfulConfig, ReviewSourceError> {
    ForkfulConfig::load().map_err(|error| ReviewSourceError::Configuration {
        message: error.to_string(),
    })
}
