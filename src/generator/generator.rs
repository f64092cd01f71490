use std::{
    env, fs,
    path::{Path, PathBuf},
};

use snafu::prelude::*;
use tracing::{debug, error, info, warn};

use crate::{
    config::DEFAULT_CONFIG_FILE_NAME,
    filesystem::ConfigNode,
    generator::{FailedDirectory, TreeWalker},
    report::{self, ReportBuilder},
};

pub const DEFAULT_REPORT_FILE_NAME: &str = "README.md";

/// Everything a finished run produced.
#[derive(Debug)]
pub struct GenerationOutcome {
    /// The resolved root the tree was created under.
    pub root: PathBuf,
    /// Created or already existing directories, sorted.
    pub created: Vec<PathBuf>,
    pub failures: Vec<FailedDirectory>,
    pub report_path: PathBuf,
    pub report_written: bool,
}

/// Materializes a configured directory tree under a root directory and
/// documents the result in a Markdown report.
#[derive(Debug, Clone)]
pub struct DirectoryGenerator {
    root: PathBuf,
    tree: ConfigNode,
    report_path: Option<PathBuf>,
    config_name: String,
}

impl DirectoryGenerator {
    pub fn new(root: impl Into<PathBuf>, tree: ConfigNode) -> Self {
        let root = root.into();
        info!("Initializing directory generator, root directory: {}", root.display());
        Self {
            root,
            tree,
            report_path: None,
            config_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
        }
    }

    /// Overrides the report destination, which defaults to `README.md` inside the root.
    pub fn with_report_path(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(report_path.into());
        self
    }

    /// Name of the configuration file, mentioned in the report's usage notes.
    pub fn with_config_name(mut self, config_name: impl Into<String>) -> Self {
        self.config_name = config_name.into();
        self
    }

    /// Creates the configured directories and writes the report.
    ///
    /// Single directories that cannot be created are reported in the
    /// outcome. Only a root that cannot be used aborts the run.
    pub fn generate(&self) -> Result<GenerationOutcome, StructuralError> {
        info!("{}", "=".repeat(50));
        info!("Starting directory generation");
        if let Some(dump) = report::dump_config(&self.tree) {
            debug!("Configuration structure:\n{}", dump);
        }

        let root = self
            .prepare_root()
            .inspect_err(|e| error!("Directory generation interrupted: {:?}", e))?;

        let mut walker = TreeWalker::new();
        walker.process_node(&self.tree, &root);
        info!(
            "Directory generation finished, {} directories created",
            walker.record().len()
        );
        if walker.record().is_empty() && walker.failures().is_empty() {
            info!("The configuration describes no directories");
        }
        if !walker.failures().is_empty() {
            warn!("{} directories could not be created", walker.failures().len());
        }

        let (record, failures) = walker.finish();
        let created = record.into_sorted();

        let report_path = self.report_destination(&root);
        let contents = ReportBuilder::new(&created, &root, &self.tree)
            .config_name(&self.config_name)
            .build();
        let report_written = report::write_report(&report_path, &contents);
        if report_written {
            info!("README written to {}", report_path.display());
        } else {
            warn!("README could not be written");
        }

        Ok(GenerationOutcome {
            root,
            created,
            failures,
            report_path,
            report_written,
        })
    }

    /// Makes sure the root exists as a directory and returns its resolved path.
    fn prepare_root(&self) -> Result<PathBuf, StructuralError> {
        let absolute = if self.root.is_absolute() {
            self.root.clone()
        } else {
            env::current_dir().context(CurrentDirSnafu)?.join(&self.root)
        };

        ensure!(
            !absolute.exists() || absolute.is_dir(),
            RootNotDirectorySnafu { path: &absolute }
        );
        fs::create_dir_all(&absolute).context(RootCreationSnafu { path: &absolute })?;
        absolute
            .canonicalize()
            .context(RootResolveSnafu { path: &absolute })
    }

    fn report_destination(&self, root: &Path) -> PathBuf {
        match &self.report_path {
            Some(path) => path.clone(),
            None => root.join(DEFAULT_REPORT_FILE_NAME),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum StructuralError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: std::io::Error },
    #[snafu(display("Root path {} exists but is not a directory", path.display()))]
    RootNotDirectory { path: PathBuf },
    #[snafu(display("Failed to create root directory {}", path.display()))]
    RootCreationError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to resolve root directory {}", path.display()))]
    RootResolveError {
        path: PathBuf,
        source: std::io::Error,
    },
}
