#![allow(clippy::enum_variant_names)]

use clap::Parser as _;
use tracing::{debug, error, info};

use crate::{
    application::{Application, ApplicationError, print_summary},
    cli::Cli,
    ext::PathExt,
};

mod application;
mod cli;
mod config;
mod ext;
mod filesystem;
mod generator;
mod logging;
mod report;

#[snafu::report]
fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    let log_file = logging::setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let outcome = Application::run(cli_args).inspect_err(|e| error!("Run failed: {}", e))?;
    print_summary(&outcome);

    if let Some(log_file) = log_file {
        info!("Log file location: {}", log_file.display_resolved());
    }
    Ok(())
}
