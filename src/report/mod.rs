//! Markdown summary of a generation run.

mod markdown;

pub use markdown::{ReportBuilder, dump_config, write_report};
