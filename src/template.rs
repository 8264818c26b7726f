use crate::{
    config::{Configuration, StructureNode},
    errors::{FileOperation, IoError},
};
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("I/O error within template domain")]
    #[diagnostic(code(projgen::template::io))]
    Io(#[from] IoError),

    #[error("Configuration file '{path}' is not in YAML format")]
    #[diagnostic(
        code(projgen::template::unsupported_file_type),
        help("Only YAML is supported: use a '.yml' or '.yaml' extension")
    )]
    UnsupportedFileType { path: PathBuf },

    #[error("Error occurred attempting to serialize the template")]
    #[diagnostic(code(projgen::template::serialize))]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },
}

const SUPPORTED_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

lazy_static::lazy_static! {
    /// Starter document written by [`emit_template`].
    pub static ref TEMPLATE_CONFIGURATION: Configuration = Configuration::new(
        "<project name here>",
        vec![
            StructureNode::folder(
                "<folder name here>",
                vec![StructureNode::file(
                    "<child file name here>",
                    "<file content or leave empty>",
                )],
            ),
            StructureNode::folder("<name of second folder>", vec![]),
        ],
    )
    .expect("a valid template configuration");
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Writes [`TEMPLATE_CONFIGURATION`] as YAML to `output`, replacing any existing file.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFileType`] without touching the filesystem when
/// `output` does not end in `.yml` or `.yaml`.
pub fn emit_template(output: &Path) -> Result<(), TemplateError> {
    if !is_supported_extension(output) {
        return Err(TemplateError::UnsupportedFileType {
            path: output.to_path_buf(),
        });
    }

    let document = serde_yaml::to_string(&*TEMPLATE_CONFIGURATION)
        .map_err(|error| TemplateError::Serialize { source: error })?;

    std::fs::write(output, document)
        .map_err(|error| IoError::new(FileOperation::Write, output.to_path_buf(), error))?;

    log::debug!("wrote template to {}", output.display());

    Ok(())
}
