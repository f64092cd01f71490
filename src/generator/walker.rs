use std::{
    fs,
    path::{self, Path, PathBuf},
};

use snafu::prelude::*;
use tracing::{debug, error, warn};

use crate::{
    ext::PathExt,
    filesystem::{ConfigNode, DirectoryRecord, LeafEntry},
};

/// A directory that could not be materialized.
#[derive(Debug)]
pub struct FailedDirectory {
    pub path: PathBuf,
    pub error: DirectoryCreationError,
}

/// Walks a [`ConfigNode`] tree and creates one directory per named node.
///
/// A failure is contained to the node it happened on: a failed branch skips
/// its own subtree, a failed list entry skips only itself.
#[derive(Debug, Default)]
pub struct TreeWalker {
    record: DirectoryRecord,
    failures: Vec<FailedDirectory>,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_node(&mut self, node: &ConfigNode, current_path: &Path) {
        match node {
            ConfigNode::Branch(children) => {
                for (name, child) in children {
                    if let Some(new_path) = self.create_child(current_path, name) {
                        debug!("Entering subtree: {}", new_path.display());
                        self.process_node(child, &new_path);
                    }
                }
            }
            ConfigNode::LeafList(entries) => {
                for entry in entries {
                    match entry {
                        LeafEntry::Name(name) => {
                            self.create_child(current_path, name);
                        }
                        LeafEntry::Unsupported(kind) => warn!(
                            "Ignoring unsupported {} entry in the list under {}",
                            kind,
                            current_path.display()
                        ),
                    }
                }
            }
            ConfigNode::Empty => {
                debug!("Empty node under {}, nothing to create", current_path.display());
            }
            ConfigNode::Unsupported(kind) => warn!(
                "Ignoring unsupported {} node under {}",
                kind,
                current_path.display()
            ),
        }
    }

    /// Creates `path` and its missing ancestors, recording the resolved path.
    ///
    /// An existing directory counts as success. Failures are logged and
    /// recorded, never propagated.
    pub fn create_directory(&mut self, path: &Path) -> bool {
        match try_create_directory(path) {
            Ok(resolved) => {
                debug!("Created directory: {}", resolved.display());
                if !self.record.insert(resolved) {
                    debug!("Directory was already recorded");
                }
                true
            }
            Err(error) => {
                self.record_failure(path.to_path_buf(), error);
                false
            }
        }
    }

    pub fn record(&self) -> &DirectoryRecord {
        &self.record
    }

    pub fn failures(&self) -> &[FailedDirectory] {
        &self.failures
    }

    pub fn finish(self) -> (DirectoryRecord, Vec<FailedDirectory>) {
        (self.record, self.failures)
    }

    fn create_child(&mut self, parent: &Path, name: &str) -> Option<PathBuf> {
        let path = match directory_segment(name) {
            Ok(segment) => parent.join(segment),
            Err(error) => {
                self.record_failure(parent.join(name.trim()), error);
                return None;
            }
        };
        self.create_directory(&path).then_some(path)
    }

    fn record_failure(&mut self, path: PathBuf, error: DirectoryCreationError) {
        error!("Directory creation error ({}): {:?}", path.display(), error);
        self.failures.push(FailedDirectory { path, error });
    }
}

fn try_create_directory(path: &Path) -> Result<PathBuf, DirectoryCreationError> {
    fs::create_dir_all(path).context(CreateDirectorySnafu { path })?;
    ensure!(path.is_dir(), MissingAfterCreateSnafu { path });
    Ok(path.resolved())
}

/// Trims `name` and checks that it names exactly one directory below its parent.
fn directory_segment(name: &str) -> Result<&str, DirectoryCreationError> {
    let trimmed = name.trim();
    ensure!(
        !trimmed.is_empty(),
        InvalidNameSnafu {
            name,
            reason: "the name is empty"
        }
    );
    ensure!(
        trimmed != "." && trimmed != "..",
        InvalidNameSnafu {
            name,
            reason: "the name refers to an existing directory level"
        }
    );
    ensure!(
        !trimmed.chars().any(path::is_separator),
        InvalidNameSnafu {
            name,
            reason: "the name contains a path separator"
        }
    );
    Ok(trimmed)
}

#[derive(Debug, Snafu)]
pub enum DirectoryCreationError {
    #[snafu(display("Invalid directory name '{}': {}", name, reason))]
    InvalidName { name: String, reason: &'static str },
    #[snafu(display("Failed to create directory {}", path.display()))]
    CreateDirectoryError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Directory {} does not exist after creation", path.display()))]
    MissingAfterCreate { path: PathBuf },
}
