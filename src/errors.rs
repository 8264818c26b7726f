use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("removing a file")]
    Remove,
    #[error("removing a directory")]
    RemoveDir,
    #[error("resolving the current directory")]
    CurrentDir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(projgen::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
    /// The [`std::io::ErrorKind`] of the underlying failure.
    pub fn kind(&self) -> std::io::ErrorKind {
        self.source.kind()
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileFormat {
    #[error("yaml")]
    Yaml,
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{path}': {source}")]
#[diagnostic(code(projgen::parse), help("Review file"))]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: std::path::PathBuf,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
impl ParseError {
    pub fn yaml(path: std::path::PathBuf, error: serde_yaml::Error) -> Self {
        Self {
            file_format: FileFormat::Yaml,
            path,
            source: Box::new(error),
        }
    }
    pub fn toml(path: std::path::PathBuf, error: toml::de::Error) -> Self {
        Self {
            file_format: FileFormat::Toml,
            path,
            source: Box::new(error),
        }
    }
}
