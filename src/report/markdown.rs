use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml, YamlEmitter};
use snafu::prelude::*;
use tracing::{error, warn};

use crate::{
    config::{DEFAULT_CONFIG_FILE_NAME, DIRECTORY_STRUCTURE_KEY},
    filesystem::ConfigNode,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const INDENT: &str = "    ";

/// Renders the Markdown summary of a generation run.
pub struct ReportBuilder<'a> {
    created: &'a [PathBuf],
    root: &'a Path,
    tree: &'a ConfigNode,
    config_name: &'a str,
    generated_at: DateTime<Local>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(created: &'a [PathBuf], root: &'a Path, tree: &'a ConfigNode) -> Self {
        Self {
            created,
            root,
            tree,
            config_name: DEFAULT_CONFIG_FILE_NAME,
            generated_at: Local::now(),
        }
    }

    pub fn config_name(mut self, config_name: &'a str) -> Self {
        self.config_name = config_name;
        self
    }

    #[cfg(test)]
    pub fn generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn build(&self) -> String {
        let mut lines = vec![
            "# Directory Structure".to_string(),
            String::new(),
            "This directory tree was generated automatically from its configuration file."
                .to_string(),
            String::new(),
            format!(
                "**Generated at**: {}",
                self.generated_at.format(TIMESTAMP_FORMAT)
            ),
            String::new(),
            format!("**Total directories**: {}", self.created.len()),
            String::new(),
            "## Directory tree".to_string(),
            String::new(),
        ];
        lines.extend(self.tree_lines());
        lines.extend([
            String::new(),
            "## Usage".to_string(),
            String::new(),
            "1. This structure is generated by `dirgen`".to_string(),
            format!(
                "2. Edit `{}` to adjust the directory structure",
                self.config_name
            ),
            "3. Running the generator again keeps existing directories".to_string(),
            String::new(),
            "## Configuration".to_string(),
            String::new(),
            "```yaml".to_string(),
        ]);
        match dump_config(self.tree) {
            Some(dump) => lines.push(dump.trim_end().to_string()),
            None => lines.push("# the configuration could not be serialized".to_string()),
        }
        lines.push("```".to_string());

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }

    /// One line per directory, indented by its depth below the root and
    /// labelled with its own name. Paths outside the root are printed in full.
    fn tree_lines(&self) -> Vec<String> {
        self.created
            .iter()
            .map(|path| {
                let relative = path.strip_prefix(self.root).ok();
                match relative.and_then(|relative| {
                    let label = relative.components().next_back()?;
                    Some((relative.components().count(), label))
                }) {
                    Some((depth, label)) => format!(
                        "{}- {}",
                        INDENT.repeat(depth - 1),
                        label.as_os_str().to_string_lossy()
                    ),
                    None => format!("- {}", path.display()),
                }
            })
            .collect()
    }
}

/// Serializes the tree back into a `directory_structure` YAML document.
pub fn dump_config(tree: &ConfigNode) -> Option<String> {
    let mut document = LinkedHashMap::new();
    document.insert(
        Yaml::Value(Scalar::String(Cow::Borrowed(DIRECTORY_STRUCTURE_KEY))),
        tree.to_yaml(),
    );
    let document = Yaml::Mapping(document);

    let mut output = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut output);
        if let Err(e) = emitter.dump(&document) {
            warn!("Failed to serialize the configuration: {:?}", e);
            return None;
        }
    }

    match output.strip_prefix("---") {
        Some(body) => Some(body.trim_start().to_string()),
        None => Some(output),
    }
}

/// Writes the report, logging instead of failing when that is not possible.
pub fn write_report(destination: &Path, contents: &str) -> bool {
    match fs::write(destination, contents).context(ReportWriteSnafu { path: destination }) {
        Ok(()) => true,
        Err(e) => {
            error!("{}", snafu::Report::from_error(e));
            false
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to write report to {}", path.display()))]
pub struct ReportWriteError {
    path: PathBuf,
    source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectoryConfig;
    use chrono::TimeZone;
    use rstest::*;
    use tempfile::TempDir;

    fn tree(contents: &str) -> ConfigNode {
        DirectoryConfig::try_from(contents)
            .expect("valid config")
            .into_tree()
    }

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 4, 15, 14, 16, 0)
            .single()
            .expect("unambiguous local time")
    }

    fn section<'r>(report: &'r str, heading: &str) -> Vec<&'r str> {
        report
            .lines()
            .skip_while(|line| *line != heading)
            .skip(2)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn report_renders_indented_tree() {
        let root = Path::new("/r");
        let created: Vec<PathBuf> = ["/r/A", "/r/A/B", "/r/A/B/C", "/r/A/D", "/r/E"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let config = tree("directory_structure:\n  A:\n    B: [C]\n    D: ~\n  E: ~\n");

        let report = ReportBuilder::new(&created, root, &config)
            .generated_at(fixed_time())
            .build();

        assert_eq!(
            section(&report, "## Directory tree"),
            vec!["- A", "    - B", "        - C", "    - D", "- E"]
        );
        assert!(report.contains("**Total directories**: 5"));
        assert!(report.contains("**Generated at**: 2025-04-15 14:16:00"));
    }

    #[test]
    fn paths_outside_root_are_rendered_in_full() {
        let created = vec![PathBuf::from("/r/A"), PathBuf::from("/elsewhere/B")];
        let config = tree("directory_structure: [A]\n");

        let report = ReportBuilder::new(&created, Path::new("/r"), &config).build();

        assert_eq!(
            section(&report, "## Directory tree"),
            vec!["- A".to_string(), format!("- {}", Path::new("/elsewhere/B").display())]
        );
    }

    #[test]
    fn empty_run_reports_zero_directories() {
        let report = ReportBuilder::new(&[], Path::new("/r"), &ConfigNode::Empty).build();

        assert!(report.contains("**Total directories**: 0"));
        assert!(section(&report, "## Directory tree").is_empty());
    }

    #[test]
    fn report_mentions_config_name_and_embeds_config() {
        let config = tree("directory_structure:\n  Archive: [2024, 2025]\n");

        let report = ReportBuilder::new(&[], Path::new("/r"), &config)
            .config_name("layout.yaml")
            .build();

        assert!(report.contains("2. Edit `layout.yaml` to adjust the directory structure"));
        let embedded: String = report
            .split("```yaml\n")
            .nth(1)
            .and_then(|rest| rest.split("```").next())
            .expect("config block present")
            .to_string();
        let reparsed = DirectoryConfig::try_from(embedded.as_str()).expect("embedded yaml parses");
        assert_eq!(reparsed.into_tree(), config);
    }

    #[rstest]
    #[case("directory_structure:\n  A: [B, C]\n  D: ~\n")]
    #[case("directory_structure:\n  \"  padded  \":\n    inner: [x]\n")]
    #[case("directory_structure: ~\n")]
    #[case("directory_structure:\n  000: [010, 1.10]\n")]
    fn dump_config_reparses_to_the_same_tree(#[case] contents: &str) {
        let config = tree(contents);
        let dumped = dump_config(&config).expect("config serializes");

        assert!(dumped.starts_with("directory_structure:"));
        assert_eq!(tree(&dumped), config);
    }

    #[test]
    fn write_report_writes_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let destination = dir.path().join("README.md");

        assert!(write_report(&destination, "# hello\n"));
        assert_eq!(fs::read_to_string(&destination).unwrap(), "# hello\n");
    }

    #[test]
    fn write_report_returns_false_on_failure() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let destination = dir.path().join("missing").join("README.md");

        assert!(!write_report(&destination, "# hello\n"));
        assert!(!destination.exists());
    }
}
