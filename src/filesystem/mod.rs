//! In-memory model of the directory tree described by the configuration,
//! and the record of directories materialized from it.
//!
//! The tree is built once from YAML and only read afterwards; the record
//! grows while the tree is walked and is sorted when the run finishes.

mod record;
mod tree;

pub use record::DirectoryRecord;
pub use tree::{ConfigNode, LeafEntry, NodeKind, scalar_name};
