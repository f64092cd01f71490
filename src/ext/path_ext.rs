use std::env;
use std::path::{Component, Path, PathBuf};

/// Resolves `path` to an absolute path without requiring it to exist.
///
/// Existing paths are canonicalized, so symlinks are followed. Missing
/// paths are joined onto the working directory and `.`/`..` are folded
/// lexically.
pub fn resolve_best_effort(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(current_dir) => current_dir.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    fold_dots(&absolute)
}

fn fold_dots(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut folded, component| {
            match component {
                Component::CurDir => {}
                // popping the filesystem root is a no-op
                Component::ParentDir => {
                    folded.pop();
                }
                other => folded.push(other),
            }
            folded
        })
}

pub trait PathExt {
    fn resolved(&self) -> PathBuf;

    fn display_resolved(&self) -> String {
        self.resolved().display().to_string()
    }
}

impl PathExt for Path {
    fn resolved(&self) -> PathBuf {
        resolve_best_effort(self)
    }
}
