mod generator;
mod walker;

pub use generator::{DirectoryGenerator, GenerationOutcome, StructuralError};
#[cfg(test)]
pub use walker::DirectoryCreationError;
pub use walker::{FailedDirectory, TreeWalker};
