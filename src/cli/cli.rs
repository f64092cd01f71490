use std::path::PathBuf;

use clap::Parser;

use crate::{application::data::LogLevel, config::DEFAULT_CONFIG_FILE_NAME};

pub const DEFAULT_ROOT: &str = "./directory-system";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Create a nested directory structure from a YAML description"
)]
pub struct Cli {
    /// YAML file with a `directory_structure` section
    #[clap(long, short, default_value = DEFAULT_CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Directory the structure is created under
    #[clap(long, short, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Where to write the Markdown report [default: <ROOT>/README.md]
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    #[clap(long, short, default_value = "info", value_enum)]
    pub log_level: LogLevel,

    /// Directory for the timestamped log file
    #[clap(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Only log to the console
    #[clap(long)]
    pub no_log_file: bool,
}
