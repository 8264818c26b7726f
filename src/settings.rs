use crate::{
    builder::DEFAULT_MAX_DEPTH,
    errors::{FileOperation, IoError, ParseError},
};
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// File name used for emitted templates when only a directory is given.
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "project.yml";

#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    #[error("I/O error within settings domain")]
    #[diagnostic(code(projgen::settings::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("max-depth must be at least 1, got {value}")]
    #[diagnostic(
        code(projgen::settings::invalid_max_depth),
        help("Top-level structure entries are depth 1; use 1 or more")
    )]
    InvalidMaxDepth { value: usize },
}

/// Tool-level options, as opposed to a project [`Configuration`](crate::config::Configuration).
///
/// ```toml
/// max-depth = 2
/// template-file-name = "project.yml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Deepest structure level that is materialized; deeper children are ignored.
    pub max_depth: usize,
    pub template_file_name: String,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            template_file_name: DEFAULT_TEMPLATE_FILE_NAME.to_string(),
        }
    }
}
impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let parsed: Settings = toml::from_str(&content)
            .map_err(|error| ParseError::toml(path.to_path_buf(), error))?;

        log::debug!("loaded settings from {}: {:?}", path.display(), parsed);

        parsed.with_max_depth(None)
    }
    /// Applies a command line override and checks the depth limit.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Result<Self, SettingsError> {
        if let Some(value) = max_depth {
            self.max_depth = value;
        }

        if self.max_depth == 0 {
            return Err(SettingsError::InvalidMaxDepth {
                value: self.max_depth,
            });
        }

        Ok(self)
    }
}
