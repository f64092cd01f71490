mod application_impl;
pub mod data;
mod runtime_config;
mod summary;

pub use application_impl::{Application, ApplicationError};
pub use runtime_config::RuntimeConfig;
pub use summary::print_summary;
