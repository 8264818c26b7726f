use crate::{
    errors::{FileOperation, IoError, ParseError},
    utils::is_single_segment,
};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};
use thiserror::Error;

pub const PROJECT_NAME_KEY: &str = "projectName";
pub const STRUCTURE_KEY: &str = "structure";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    Absent,
    Empty,
}
impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "is absent"),
            Self::Empty => write!(f, "has an empty value"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("I/O error within configuration domain")]
    #[diagnostic(code(projgen::config::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("Required key '{key}' {reason}")]
    #[diagnostic(
        code(projgen::config::missing_required_key),
        help("Every configuration needs a non-empty 'projectName' and a 'structure' list")
    )]
    MissingRequiredKey {
        key: &'static str,
        reason: MissingReason,
    },

    #[error("Project name '{name}' is not a valid directory name")]
    #[diagnostic(
        code(projgen::config::invalid_project_name),
        help("Use a single directory name without path separators, '.' or '..'")
    )]
    InvalidProjectName { name: String },
}

/// Value of a node's `type` key.
///
/// Unrecognized values are kept as [`NodeKind::Other`] so that a document still loads;
/// they are dealt with when the structure is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Folder,
    File,
    Other(String),
}
impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "folder" => Self::Folder,
            "file" => Self::File,
            _ => Self::Other(value),
        }
    }
}
impl From<NodeKind> for String {
    fn from(value: NodeKind) -> Self {
        match value {
            NodeKind::Folder => "folder".to_string(),
            NodeKind::File => "file".to_string(),
            NodeKind::Other(other) => other,
        }
    }
}

/// One entry of the `structure` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureNode {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<StructureNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Typed view of a [`StructureNode`] whose `type` is present.
#[derive(Debug, PartialEq, Eq)]
pub enum Entry<'a> {
    Folder { children: &'a [StructureNode] },
    File { content: &'a str },
    Unknown { kind: &'a str },
}

impl StructureNode {
    pub fn folder(name: impl Into<String>, children: Vec<StructureNode>) -> Self {
        Self {
            name: name.into(),
            kind: Some(NodeKind::Folder),
            children: Some(children),
            content: None,
        }
    }
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(NodeKind::File),
            children: None,
            content: Some(content.into()),
        }
    }
    /// Returns `None` when the node has no `type`.
    pub fn entry(&self) -> Option<Entry<'_>> {
        let entry = match self.kind.as_ref()? {
            NodeKind::Folder => Entry::Folder {
                children: self.children.as_deref().unwrap_or(&[]),
            },
            NodeKind::File => Entry::File {
                content: self.content.as_deref().unwrap_or_default(),
            },
            NodeKind::Other(kind) => Entry::Unknown { kind },
        };

        Some(entry)
    }
}

/// A configuration document as it was deserialized, before [`validate`] has looked at it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfiguration {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub structure: Option<Vec<StructureNode>>,
}

/// A validated configuration: a usable project name and a structure list.
///
/// The nodes inside `structure` are not checked until they are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    project_name: String,
    structure: Vec<StructureNode>,
}
impl Configuration {
    pub fn new(
        project_name: impl Into<String>,
        structure: Vec<StructureNode>,
    ) -> Result<Self, ConfigError> {
        validate(RawConfiguration {
            project_name: Some(project_name.into()),
            structure: Some(structure),
        })
    }
    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub fn structure(&self) -> &[StructureNode] {
        &self.structure
    }
    /// Parses and validates a YAML document; `origin` is only used for error reporting.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = serde_yaml::from_str(content)
            .map_err(|error| ParseError::yaml(origin.to_path_buf(), error))?;

        validate(raw)
    }
}

/// Checks the top-level keys of a configuration document.
///
/// Only `projectName` and `structure` are inspected; a malformed node deeper in the
/// tree is reported by the builder once it is reached.
pub fn validate(raw: RawConfiguration) -> Result<Configuration, ConfigError> {
    let project_name = match raw.project_name {
        None => {
            return Err(ConfigError::MissingRequiredKey {
                key: PROJECT_NAME_KEY,
                reason: MissingReason::Absent,
            })
        }
        Some(name) if name.trim().is_empty() => {
            return Err(ConfigError::MissingRequiredKey {
                key: PROJECT_NAME_KEY,
                reason: MissingReason::Empty,
            })
        }
        Some(name) => name,
    };

    if !is_single_segment(&project_name) {
        return Err(ConfigError::InvalidProjectName { name: project_name });
    }

    let structure = raw.structure.ok_or(ConfigError::MissingRequiredKey {
        key: STRUCTURE_KEY,
        reason: MissingReason::Absent,
    })?;

    Ok(Configuration {
        project_name,
        structure,
    })
}

/// Reads, parses and validates the configuration document at `path`.
pub fn load_configuration<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();

    log::debug!("loading configuration from {}", path.display());

    let content = fs::read_to_string(path)
        .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

    Configuration::from_yaml_str(&content, path)
}
