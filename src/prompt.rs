use inquire::Confirm;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Unable to read the answer to '{question}'")]
    #[diagnostic(
        code(projgen::prompt::inquire),
        help("Run in an interactive terminal, or pass --yes to skip the question")
    )]
    Inquire {
        question: String,
        #[source]
        source: inquire::InquireError,
    },
}

/// Asks whether an existing project root may be deleted and generated again.
///
/// Defaults to "no".
pub fn confirm_overwrite(project_root: &Path) -> Result<bool, PromptError> {
    let question = format!(
        "Project root ({}) already exists, should it be overwritten?",
        project_root.display()
    );

    Confirm::new(&question)
        .with_default(false)
        .with_help_message("Everything inside it will be deleted")
        .prompt()
        .map_err(|error| PromptError::Inquire {
            question: question.clone(),
            source: error,
        })
}
