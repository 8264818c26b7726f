use crate::{
    builder::StructureBuilder,
    config::{self, ConfigError},
    errors::{FileOperation, IoError},
    preview::preview_structure,
    project::{self, GenerationError},
    prompt::{self, PromptError},
    settings::{Settings, SettingsError},
    template::{self, TemplateError},
};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ProjectGeneratorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Settings(#[from] SettingsError),
}

/// What [`generate_project`] ended up doing.
#[derive(Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The project was generated at the contained root.
    Generated(PathBuf),
    /// The root already existed and overwriting it was declined; nothing was changed.
    Declined(PathBuf),
}

fn current_dir() -> Result<PathBuf, IoError> {
    std::env::current_dir()
        .map_err(|error| IoError::new(FileOperation::CurrentDir, PathBuf::from("."), error))
}

/// Writes the starter configuration and returns the path it was written to.
///
/// Without an `output` the template goes to the current directory; when `output` is an
/// existing directory the configured template file name is appended to it.
///
/// # Errors
///
/// Returns a [`ProjectGeneratorError`] if:
///
/// - The current directory cannot be resolved.
/// - The target does not have a YAML extension.
/// - The file cannot be written.
pub fn write_template(
    output: Option<&Path>,
    settings: &Settings,
) -> Result<PathBuf, ProjectGeneratorError> {
    let target = match output {
        Some(path) if !path.is_dir() => path.to_path_buf(),
        Some(directory) => directory.join(&settings.template_file_name),
        None => current_dir()?.join(&settings.template_file_name),
    };

    template::emit_template(&target)?;

    Ok(target)
}

/// Loads the configuration at `configuration_path` and generates it under `output`
/// (the current directory when `None`).
///
/// The planned structure is previewed first. When the project root already exists the
/// user is asked before it is replaced, unless `assume_yes` is set.
///
/// # Errors
///
/// Returns a [`ProjectGeneratorError`] if:
///
/// - The configuration cannot be read, parsed or validated.
/// - The user prompt fails.
/// - Any directory or file cannot be created, or a structure entry is malformed.
pub fn generate_project(
    configuration_path: &Path,
    output: Option<&Path>,
    assume_yes: bool,
    settings: &Settings,
) -> Result<GenerationOutcome, ProjectGeneratorError> {
    let config = config::load_configuration(configuration_path)?;

    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => current_dir()?,
    };

    let root = project::project_root(&config, &destination);

    preview_structure(&config, &destination, settings.max_depth);

    let exists = std::fs::symlink_metadata(&root).is_ok();

    if exists && !assume_yes && !prompt::confirm_overwrite(&root)? {
        log::info!("overwriting {} declined", root.display());

        return Ok(GenerationOutcome::Declined(root));
    }

    let builder = StructureBuilder::new(settings.max_depth);

    let root = project::generate_with(&builder, &config, &destination, exists)?;

    Ok(GenerationOutcome::Generated(root))
}
