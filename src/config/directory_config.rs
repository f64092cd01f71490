use std::{fs, path::Path};

use saphyr::{ScanError, Yaml, YamlLoader};
use saphyr_parser::Parser;
use snafu::prelude::*;
use tracing::{debug, error, info};

use crate::{
    ext::PathExt,
    filesystem::{ConfigNode, scalar_name},
};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level key holding the directory tree.
pub const DIRECTORY_STRUCTURE_KEY: &str = "directory_structure";

/// The directory tree parsed from a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryConfig {
    tree: ConfigNode,
}

impl DirectoryConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let result = Self::from_path(path);
        match &result {
            Ok(_) => info!("Loaded config file: {}", path.display_resolved()),
            Err(e) => error!("Failed to load config file: {}", snafu::Report::from_error(e)),
        }
        result
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config file: {}", path.display_resolved());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.display_resolved(),
        })?;
        debug!("Successfully read config file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    pub fn tree(&self) -> &ConfigNode {
        &self.tree
    }

    pub fn into_tree(self) -> ConfigNode {
        self.tree
    }
}

impl TryFrom<&str> for DirectoryConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = load_yaml(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;
        let (_, structure) = top_level
            .iter()
            .find(|(key, _)| scalar_name(key).as_deref() == Some(DIRECTORY_STRUCTURE_KEY))
            .context(MissingDirectoryStructureSnafu)?;

        Ok(DirectoryConfig {
            tree: ConfigNode::from(structure),
        })
    }
}

/// Loads YAML documents keeping every scalar as written.
///
/// Scalars stay in their `Yaml::Representation` form so that names like
/// `010` or `1.10` are not normalized into numbers.
pub(crate) fn load_yaml(contents: &str) -> Result<Vec<Yaml<'_>>, ScanError> {
    let mut parser = Parser::new_from_str(contents);
    let mut loader: YamlLoader<'_, Yaml<'_>> = YamlLoader::default();
    loader.early_parse(false);
    parser.load(&mut loader, true)?;
    Ok(loader.into_documents())
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("The config file contains no YAML document"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config has no '{}' section", DIRECTORY_STRUCTURE_KEY))]
    MissingDirectoryStructure,
}
