use crate::{
    config::{Entry, StructureNode},
    errors::{FileOperation, IoError},
    utils::is_single_segment,
};
use colored::Colorize;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Deepest structure level created by default. Top-level entries are depth 1, so with
/// the project root itself this allows three levels of directories.
pub const DEFAULT_MAX_DEPTH: usize = 2;

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("I/O error within structure domain")]
    #[diagnostic(code(projgen::builder::io))]
    Io(#[from] IoError),

    #[error("Item '{name}' is missing 'type' key")]
    #[diagnostic(
        code(projgen::builder::type_missing),
        help("Every structure entry needs `type: folder` or `type: file`. Entries created before this one were left on disk.")
    )]
    TypeMissingFromConfiguration { name: String },

    #[error("Item name '{name}' is not a valid file or directory name")]
    #[diagnostic(
        code(projgen::builder::invalid_node_name),
        help("Use a single name without path separators, '.' or '..'")
    )]
    InvalidNodeName { name: String },
}

/// Materializes a list of [`StructureNode`]s below a root directory.
///
/// Nodes are processed depth first in the order they are listed. The first failure
/// stops the walk and whatever was created up to that point stays on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureBuilder {
    max_depth: usize,
}
impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
impl StructureBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
    /// Creates `nodes` inside `root`, treating them as living at nesting level `depth`.
    ///
    /// Levels past [`StructureBuilder::max_depth`] are skipped with a warning, never
    /// reported as an error.
    pub fn build(
        &self,
        nodes: &[StructureNode],
        root: &Path,
        depth: usize,
    ) -> Result<(), BuildError> {
        if depth > self.max_depth {
            if !nodes.is_empty() {
                let names: Vec<&str> = nodes.iter().map(|node| node.name.as_str()).collect();
                log::warn!(
                    "ignoring {} entries in {} beyond max depth {}: {}",
                    nodes.len(),
                    root.display(),
                    self.max_depth,
                    names.join(", ")
                );
            }
            return Ok(());
        }

        for node in nodes {
            if !is_single_segment(&node.name) {
                return Err(BuildError::InvalidNodeName {
                    name: node.name.clone(),
                });
            }

            let path = root.join(&node.name);

            let entry = node
                .entry()
                .ok_or_else(|| BuildError::TypeMissingFromConfiguration {
                    name: node.name.clone(),
                })?;

            match entry {
                Entry::Folder { children } => {
                    create_directory(&path)?;

                    if !children.is_empty() {
                        self.build(children, &path, depth + 1)?;
                    }
                }
                Entry::File { content } => write_file(&path, content)?,
                Entry::Unknown { kind } => {
                    log::warn!("skipping '{}' with unknown type '{}'", node.name, kind);
                }
            }
        }

        Ok(())
    }
}

/// Creates a single directory; the parent must exist and the directory must not.
fn create_directory(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    log::debug!("created directory {}", path.display());

    println!("{} {}", "create".green(), path.display());

    Ok(())
}
/// Creates or truncates the file at `path` and writes `contents` to it.
fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    log::debug!("wrote {} bytes to {}", contents.len(), path.display());

    println!("{} {}", "create".green(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeKind;
    use std::fs;

    fn untyped(name: &str) -> StructureNode {
        StructureNode {
            name: name.to_string(),
            kind: None,
            children: None,
            content: None,
        }
    }

    #[test]
    fn creates_folders_and_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![
            StructureNode::folder("src", vec![StructureNode::file("main.rs", "fn main() {}")]),
            StructureNode::folder("tests", vec![]),
            StructureNode::file("README.md", "# readme"),
        ];

        StructureBuilder::default().build(&nodes, dir.path(), 1).unwrap();

        assert!(dir.path().join("src").is_dir());
        assert!(dir.path().join("tests").is_dir());
        assert_eq!(
            fs::read_to_string(dir.path().join("src/main.rs")).unwrap(),
            "fn main() {}"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "# readme"
        );
    }

    #[test]
    fn file_without_content_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let node = StructureNode {
            content: None,
            ..StructureNode::file(".gitignore", "ignored")
        };

        StructureBuilder::default().build(&[node], dir.path(), 1).unwrap();

        assert_eq!(fs::read(dir.path().join(".gitignore")).unwrap(), b"");
    }

    #[test]
    fn existing_file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "a much longer previous content").unwrap();

        StructureBuilder::default()
            .build(&[StructureNode::file("notes.txt", "new")], dir.path(), 1)
            .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "new");
    }

    #[test]
    fn missing_type_stops_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![
            StructureNode::folder("before", vec![]),
            untyped("broken"),
            StructureNode::folder("after", vec![]),
        ];

        let result = StructureBuilder::default().build(&nodes, dir.path(), 1);

        assert!(matches!(
            result,
            Err(BuildError::TypeMissingFromConfiguration { ref name }) if name == "broken"
        ));
        assert!(dir.path().join("before").is_dir());
        assert!(!dir.path().join("broken").exists());
        assert!(!dir.path().join("after").exists());
    }

    #[test]
    fn missing_type_in_nested_node_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![
            StructureNode::folder("outer", vec![untyped("inner")]),
            StructureNode::file("later.txt", ""),
        ];

        let result = StructureBuilder::default().build(&nodes, dir.path(), 1);

        assert!(matches!(
            result,
            Err(BuildError::TypeMissingFromConfiguration { ref name }) if name == "inner"
        ));
        assert!(!dir.path().join("later.txt").exists());
    }

    #[test]
    fn existing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();

        let result = StructureBuilder::default().build(
            &[StructureNode::folder("src", vec![])],
            dir.path(),
            1,
        );

        match result {
            Err(BuildError::Io(error)) => {
                assert_eq!(error.kind(), std::io::ErrorKind::AlreadyExists)
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn children_beyond_max_depth_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![StructureNode::folder(
            "one",
            vec![StructureNode::folder(
                "two",
                vec![
                    StructureNode::folder("three", vec![]),
                    untyped("also-ignored"),
                ],
            )],
        )];

        StructureBuilder::default().build(&nodes, dir.path(), 1).unwrap();

        assert!(dir.path().join("one/two").is_dir());
        assert!(!dir.path().join("one/two/three").exists());
    }

    #[test]
    fn deeper_limit_creates_deeper_levels() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![StructureNode::folder(
            "one",
            vec![StructureNode::folder(
                "two",
                vec![StructureNode::file("three.txt", "3")],
            )],
        )];

        StructureBuilder::new(3).build(&nodes, dir.path(), 1).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("one/two/three.txt")).unwrap(),
            "3"
        );
    }

    #[test]
    fn unknown_type_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = vec![
            StructureNode {
                kind: Some(NodeKind::Other("symlink".to_string())),
                ..untyped("link")
            },
            StructureNode::file("kept.txt", ""),
        ];

        StructureBuilder::default().build(&nodes, dir.path(), 1).unwrap();

        assert!(!dir.path().join("link").exists());
        assert!(dir.path().join("kept.txt").is_file());
    }

    #[test]
    fn name_is_checked_before_type() {
        let dir = tempfile::tempdir().unwrap();

        let result = StructureBuilder::default().build(&[untyped("a/b")], dir.path(), 1);

        assert!(matches!(
            result,
            Err(BuildError::InvalidNodeName { ref name }) if name == "a/b"
        ));
    }

    #[test]
    fn traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        let result = StructureBuilder::default().build(
            &[StructureNode::file("../escaped.txt", "")],
            &root,
            1,
        );

        assert!(matches!(result, Err(BuildError::InvalidNodeName { .. })));
        assert!(!dir.path().join("escaped.txt").exists());
    }
}
