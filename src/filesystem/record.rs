use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Absolute paths of directories that were created or already existed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryRecord {
    paths: HashSet<PathBuf>,
}

impl DirectoryRecord {
    /// Returns `false` when the path was already recorded.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Finalizes the record. Paths are ordered component by component, which
    /// keeps every directory directly ahead of its descendants.
    pub fn into_sorted(self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.paths.into_iter().collect();
        paths.sort();
        paths
    }
}
