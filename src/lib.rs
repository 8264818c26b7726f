//! Generates a project directory structure from a YAML configuration.
//!
//! ```yaml
//! projectName: generic
//! structure:
//!   - name: generic
//!     type: folder
//!     children:
//!       - name: app.py
//!         type: file
//!         content: print('Hello')
//!   - name: tests
//!     type: folder
//! ```
//!
//! [`config::load_configuration`] only checks the top-level keys. Structure entries are
//! checked while [`project::generate`] builds them, so a malformed entry can leave the
//! entries before it on disk.
pub mod api;
pub mod builder;
pub mod config;
pub mod errors;
pub mod preview;
pub mod project;
pub mod prompt;
pub mod settings;
pub mod template;
pub mod utils;

pub use api::{generate_project, write_template, GenerationOutcome, ProjectGeneratorError};
pub use builder::{BuildError, StructureBuilder, DEFAULT_MAX_DEPTH};
pub use config::{
    load_configuration, validate, ConfigError, Configuration, NodeKind, RawConfiguration,
    StructureNode,
};
pub use project::{generate, generate_with, GenerationError};
pub use settings::Settings;
pub use template::{emit_template, TemplateError, TEMPLATE_CONFIGURATION};
