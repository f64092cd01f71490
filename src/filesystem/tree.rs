use std::borrow::Cow;

use derive_more::Display;
use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};
use tracing::warn;

/// The kind of YAML value found where a directory node was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("string")]
    String,
    #[display("integer")]
    Integer,
    #[display("float")]
    Float,
    #[display("boolean")]
    Boolean,
    #[display("null")]
    Null,
    #[display("mapping")]
    Mapping,
    #[display("sequence")]
    Sequence,
    #[display("alias")]
    Alias,
    #[display("unsupported value")]
    Other,
}

impl NodeKind {
    pub fn of(yaml: &Yaml) -> Self {
        match yaml {
            Yaml::Mapping(_) => NodeKind::Mapping,
            Yaml::Sequence(_) => NodeKind::Sequence,
            Yaml::Alias(_) => NodeKind::Alias,
            scalar => match parsed_scalar(scalar) {
                Some(Scalar::String(_)) => NodeKind::String,
                Some(Scalar::Integer(_)) => NodeKind::Integer,
                Some(Scalar::FloatingPoint(_)) => NodeKind::Float,
                Some(Scalar::Boolean(_)) => NodeKind::Boolean,
                Some(Scalar::Null) => NodeKind::Null,
                None => NodeKind::Other,
            },
        }
    }
}

/// A node of the configured directory tree.
///
/// Names are stored exactly as written in the configuration. Whitespace is
/// trimmed only when a name becomes a path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// Named subdirectories, each with its own subtree, in document order.
    Branch(LinkedHashMap<String, ConfigNode>),
    /// Childless subdirectories, in document order.
    LeafList(Vec<LeafEntry>),
    /// No subdirectories.
    Empty,
    /// A value that does not describe directories, e.g. `A: some text`.
    Unsupported(NodeKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeafEntry {
    Name(String),
    Unsupported(NodeKind),
}

impl ConfigNode {
    /// Converts the node back into YAML, borrowing names from `self`.
    ///
    /// Unsupported values have no directory meaning and are written as null.
    pub fn to_yaml(&self) -> Yaml<'_> {
        match self {
            ConfigNode::Branch(children) => Yaml::Mapping(
                children
                    .iter()
                    .map(|(name, child)| (name_to_yaml(name), child.to_yaml()))
                    .collect(),
            ),
            ConfigNode::LeafList(entries) => Yaml::Sequence(
                entries
                    .iter()
                    .map(|entry| match entry {
                        LeafEntry::Name(name) => name_to_yaml(name),
                        LeafEntry::Unsupported(_) => Yaml::Value(Scalar::Null),
                    })
                    .collect(),
            ),
            ConfigNode::Empty | ConfigNode::Unsupported(_) => Yaml::Value(Scalar::Null),
        }
    }

    fn branch_from_mapping(mapping: &LinkedHashMap<Yaml, Yaml>) -> Self {
        let mut children = LinkedHashMap::new();
        for (key, value) in mapping {
            let Some(name) = scalar_name(key) else {
                warn!(
                    "Skipping directory entry with a {} key, expected a name",
                    NodeKind::of(key)
                );
                continue;
            };
            if children.insert(name.clone(), ConfigNode::from(value)).is_some() {
                warn!("Directory '{}' is defined more than once, keeping the last definition", name);
            }
        }
        ConfigNode::Branch(children)
    }
}

impl From<&Yaml<'_>> for ConfigNode {
    fn from(yaml: &Yaml<'_>) -> Self {
        match yaml {
            Yaml::Mapping(mapping) => Self::branch_from_mapping(mapping),
            Yaml::Sequence(items) => {
                ConfigNode::LeafList(items.iter().map(LeafEntry::from).collect())
            }
            other => match NodeKind::of(other) {
                NodeKind::Null => ConfigNode::Empty,
                kind => ConfigNode::Unsupported(kind),
            },
        }
    }
}

impl From<&Yaml<'_>> for LeafEntry {
    fn from(yaml: &Yaml<'_>) -> Self {
        match scalar_name(yaml) {
            Some(name) => LeafEntry::Name(name),
            None => LeafEntry::Unsupported(NodeKind::of(yaml)),
        }
    }
}

/// Scalars usable as directory names, in the exact text they were written
/// with. Numbers and booleans are names too, so `010: ~` names a directory
/// `010` rather than `10`.
pub fn scalar_name(yaml: &Yaml) -> Option<String> {
    let text = match yaml {
        Yaml::Representation(text, ..) => text,
        Yaml::Value(Scalar::String(text)) => text,
        _ => return None,
    };
    match parsed_scalar(yaml)? {
        Scalar::Null => None,
        _ => Some(text.to_string()),
    }
}

/// Interprets a scalar under the YAML core schema, whether or not it was
/// parsed while loading.
fn parsed_scalar<'a>(yaml: &'a Yaml<'_>) -> Option<Scalar<'a>> {
    match yaml {
        Yaml::Value(scalar) => Some(scalar.clone()),
        Yaml::Representation(text, style, tag) => Scalar::parse_from_cow_and_metadata(
            Cow::Borrowed(text.as_ref()),
            *style,
            tag.as_ref(),
        ),
        _ => None,
    }
}

fn name_to_yaml(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_yaml;
    use rstest::*;

    fn parse(contents: &str) -> ConfigNode {
        let docs = load_yaml(contents).expect("valid yaml");
        ConfigNode::from(&docs[0])
    }

    fn names(node: &ConfigNode) -> Vec<&str> {
        match node {
            ConfigNode::Branch(children) => children.keys().map(String::as_str).collect(),
            _ => panic!("expected a branch, got {node:?}"),
        }
    }

    #[test]
    fn mapping_becomes_branch_in_document_order() {
        let node = parse("zeta: ~\nalpha: ~\nmiddle: ~\n");
        assert_eq!(names(&node), vec!["zeta", "alpha", "middle"]);
    }

    #[test]
    fn sequence_becomes_leaf_list() {
        let node = parse("- one\n- two\n");
        assert_eq!(
            node,
            ConfigNode::LeafList(vec![
                LeafEntry::Name("one".into()),
                LeafEntry::Name("two".into())
            ])
        );
    }

    #[test]
    fn null_becomes_empty() {
        assert_eq!(parse("~"), ConfigNode::Empty);
        assert_eq!(parse("null"), ConfigNode::Empty);
    }

    #[rstest]
    #[case("just text", NodeKind::String)]
    #[case("42", NodeKind::Integer)]
    #[case("true", NodeKind::Boolean)]
    fn scalar_value_is_unsupported(#[case] contents: &str, #[case] kind: NodeKind) {
        assert_eq!(parse(contents), ConfigNode::Unsupported(kind));
    }

    #[test]
    fn numeric_keys_and_entries_keep_their_text() {
        let node = parse("110:\n  - 111\n  - 112\n");
        let ConfigNode::Branch(children) = node else {
            panic!("expected a branch");
        };
        assert_eq!(
            children.get("110"),
            Some(&ConfigNode::LeafList(vec![
                LeafEntry::Name("111".into()),
                LeafEntry::Name("112".into())
            ]))
        );
    }

    #[rstest]
    #[case("000", "000")]
    #[case("010", "010")]
    #[case("1.10", "1.10")]
    #[case("2.0", "2.0")]
    #[case("0x1F", "0x1F")]
    #[case("true", "true")]
    #[case("'007'", "007")]
    fn scalar_names_keep_their_source_text(#[case] written: &str, #[case] expected: &str) {
        let node = parse(&format!("- {written}\n"));
        assert_eq!(node, ConfigNode::LeafList(vec![LeafEntry::Name(expected.into())]));
    }

    #[test]
    fn numeric_keys_keep_leading_zeros() {
        let node = parse("000: ~\n010: [001]\n");
        assert_eq!(names(&node), vec!["000", "010"]);
    }

    #[test]
    fn nested_values_in_lists_are_unsupported_entries() {
        let node = parse("- plain\n- nested: [x]\n- ~\n");
        assert_eq!(
            node,
            ConfigNode::LeafList(vec![
                LeafEntry::Name("plain".into()),
                LeafEntry::Unsupported(NodeKind::Mapping),
                LeafEntry::Unsupported(NodeKind::Null),
            ])
        );
    }

    #[test]
    fn names_are_kept_untrimmed() {
        let node = parse("\"  padded  \": ~\n");
        assert_eq!(names(&node), vec!["  padded  "]);
    }

    #[test]
    fn to_yaml_preserves_structure() {
        let node = parse("A:\n  - B\n  - C\nD: ~\nE:\n  F: ~\n");
        let yaml = node.to_yaml();
        assert_eq!(ConfigNode::from(&yaml), node);
    }

    #[test]
    fn display_names_node_kinds() {
        assert_eq!(NodeKind::Mapping.to_string(), "mapping");
        assert_eq!(NodeKind::Other.to_string(), "unsupported value");
    }
}
