use crate::{
    builder::{BuildError, StructureBuilder},
    config::Configuration,
    errors::{FileOperation, IoError},
};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error("I/O error within generation domain")]
    #[diagnostic(code(projgen::project::io))]
    Io(#[from] IoError),

    #[error("Project root '{path}' already exists")]
    #[diagnostic(
        code(projgen::project::destination_already_exists),
        help("Remove the directory, pick another destination, or allow overwriting it")
    )]
    DestinationAlreadyExists { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),
}

/// The directory `config` is generated into when `destination` is the target.
pub fn project_root(config: &Configuration, destination: &Path) -> PathBuf {
    destination.join(config.project_name())
}

/// Generates the project described by `config` under `destination` with the default
/// [`StructureBuilder`]. See [`generate_with`].
pub fn generate(
    config: &Configuration,
    destination: &Path,
    delete_existing: bool,
) -> Result<PathBuf, GenerationError> {
    generate_with(&StructureBuilder::default(), config, destination, delete_existing)
}

/// Creates `destination/<projectName>` and builds the configured structure inside it.
///
/// `destination` is created when missing. An existing project root is removed first when
/// `delete_existing` is set, otherwise [`GenerationError::DestinationAlreadyExists`] is
/// returned before anything is touched. Returns the project root.
pub fn generate_with(
    builder: &StructureBuilder,
    config: &Configuration,
    destination: &Path,
    delete_existing: bool,
) -> Result<PathBuf, GenerationError> {
    if !destination.exists() {
        fs::create_dir_all(destination).map_err(|error| {
            IoError::new(FileOperation::Mkdir, destination.to_path_buf(), error)
        })?;
        log::debug!("created destination {}", destination.display());
    }

    let root = project_root(config, destination);

    // symlink_metadata so a dangling link still counts as occupying the path
    if fs::symlink_metadata(&root).is_ok() {
        if !delete_existing {
            return Err(GenerationError::DestinationAlreadyExists { path: root });
        }
        remove_existing(&root)?;
    }

    fs::create_dir(&root)
        .map_err(|error| IoError::new(FileOperation::Mkdir, root.clone(), error))?;

    log::debug!(
        "building {} top-level entries in {}",
        config.structure().len(),
        root.display()
    );

    builder.build(config.structure(), &root, 1)?;

    Ok(root)
}

fn remove_existing(path: &Path) -> Result<(), GenerationError> {
    let is_dir = fs::symlink_metadata(path)
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);

    log::debug!("removing existing {}", path.display());

    if is_dir {
        fs::remove_dir_all(path)
            .map_err(|error| IoError::new(FileOperation::RemoveDir, path.to_path_buf(), error))?;
    } else {
        fs::remove_file(path)
            .map_err(|error| IoError::new(FileOperation::Remove, path.to_path_buf(), error))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawConfiguration, StructureNode};
    use std::collections::BTreeSet;
    use walkdir::WalkDir;

    fn generic() -> Configuration {
        Configuration::new(
            "generic",
            vec![
                StructureNode::folder(
                    "generic",
                    vec![StructureNode::file("app.py", "print('Hello')")],
                ),
                StructureNode::folder("tests", vec![]),
                StructureNode::file("setup.py", ""),
                StructureNode::file(".gitignore", ""),
            ],
        )
        .unwrap()
    }

    /// Every path below `root`, relative to it, with a trailing `/` for directories.
    fn snapshot(root: &Path) -> BTreeSet<String> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|entry| {
                let entry = entry.unwrap();
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                if entry.file_type().is_dir() {
                    format!("{relative}/")
                } else {
                    relative
                }
            })
            .collect()
    }

    fn expected_generic_tree() -> BTreeSet<String> {
        ["generic/", "generic/app.py", "tests/", "setup.py", ".gitignore"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn generates_exactly_the_configured_tree() {
        let dir = tempfile::tempdir().unwrap();

        let root = generate(&generic(), dir.path(), false).unwrap();

        assert_eq!(root, dir.path().join("generic"));
        assert_eq!(snapshot(&root), expected_generic_tree());
        assert_eq!(
            fs::read(root.join("generic/app.py")).unwrap(),
            b"print('Hello')"
        );
        assert_eq!(fs::read(root.join("setup.py")).unwrap(), b"");
    }

    #[test]
    fn creates_a_missing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("nested").join("sub_folder");

        let root = generate(&generic(), &destination, false).unwrap();

        assert!(root.join("generic").is_dir());
        assert!(root.join("tests").is_dir());
    }

    #[test]
    fn existing_root_is_kept_without_delete_existing() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("generic");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("keep.txt"), "mine").unwrap();

        let result = generate(&generic(), dir.path(), false);

        assert!(matches!(
            result,
            Err(GenerationError::DestinationAlreadyExists { ref path }) if path == &existing
        ));
        assert_eq!(fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
    }

    #[test]
    fn existing_root_is_replaced_with_delete_existing() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("generic");
        fs::create_dir_all(existing.join("generic")).unwrap();
        fs::write(existing.join("stale.txt"), "old").unwrap();

        let root = generate(&generic(), dir.path(), true).unwrap();

        assert_eq!(snapshot(&root), expected_generic_tree());
    }

    #[test]
    fn existing_file_at_root_is_replaced_with_delete_existing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("generic"), "not a directory").unwrap();

        let root = generate(&generic(), dir.path(), true).unwrap();

        assert!(root.is_dir());
    }

    #[test]
    fn missing_type_fails_after_creating_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let raw: RawConfiguration =
            serde_yaml::from_str("projectName: p\nstructure:\n  - name: a\n").unwrap();
        let config = crate::config::validate(raw).unwrap();

        let result = generate(&config, dir.path(), true);

        assert!(matches!(
            result,
            Err(GenerationError::Build(
                BuildError::TypeMissingFromConfiguration { ref name }
            )) if name == "a"
        ));
        assert!(dir.path().join("p").is_dir());
        assert!(!dir.path().join("p/a").exists());
    }

    #[test]
    fn explicit_builder_limits_depth() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::new(
            "p",
            vec![StructureNode::folder(
                "one",
                vec![StructureNode::file("two.txt", "")],
            )],
        )
        .unwrap();

        let root = generate_with(&StructureBuilder::new(1), &config, dir.path(), false).unwrap();

        assert_eq!(
            snapshot(&root),
            BTreeSet::from(["one/".to_string()])
        );
    }
}
