use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::Local;
use tracing::warn;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

use crate::cli::Cli;

const LOG_FILE_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Installs the global subscriber: a console layer at the requested level and,
/// unless disabled, a debug-level layer writing to a timestamped log file.
///
/// Returns the path of the log file when one was opened.
pub fn setup_tracing(cli_args: &Cli) -> Option<PathBuf> {
    let console_layer = cli_args.log_level.to_tracing_level().map(|level| {
        fmt::layer()
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .with_filter(LevelFilter::from_level(level))
    });

    let log_file = if cli_args.no_log_file {
        None
    } else {
        Some(open_log_file(&cli_args.log_dir))
    };
    let (file_layer, log_path, open_error) = match log_file {
        Some(Ok((file, path))) => {
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(path), None)
        }
        Some(Err(e)) => (None, None, Some(e)),
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        warn!(
            "Could not open a log file in {}, logging to the console only: {}",
            cli_args.log_dir.display(),
            e
        );
    }
    log_path
}

fn open_log_file(log_dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name());
    let file = File::create(&path)?;
    Ok((file, path))
}

fn log_file_name() -> String {
    format!("generate_{}.log", Local::now().format(LOG_FILE_TIMESTAMP))
}
