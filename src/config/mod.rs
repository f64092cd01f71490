mod directory_config;

pub(crate) use directory_config::load_yaml;
pub use directory_config::{
    ConfigError, DEFAULT_CONFIG_FILE_NAME, DIRECTORY_STRUCTURE_KEY, DirectoryConfig,
};
