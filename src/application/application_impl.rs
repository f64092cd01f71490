use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::config::{ConfigError, DirectoryConfig};
use crate::generator::{DirectoryGenerator, GenerationOutcome, StructuralError};

pub struct Application;

impl Application {
    pub fn run(
        runtime_config: impl Into<RuntimeConfig>,
    ) -> Result<GenerationOutcome, ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        debug!("Runtime config: {:?}", runtime_config);

        let config = DirectoryConfig::read(&runtime_config.config_path).context(ConfigSnafu)?;
        debug!("Loaded directory tree: {:?}", config.tree());

        let mut generator = DirectoryGenerator::new(&runtime_config.root, config.into_tree())
            .with_config_name(runtime_config.config_path.display().to_string());
        if let Some(output) = &runtime_config.output {
            generator = generator.with_report_path(output);
        }

        let outcome = generator.generate().context(GenerationSnafu)?;
        Ok(outcome)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the configuration"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Critical failure encountered during directory generation"))]
    GenerationError { source: StructuralError },
}
