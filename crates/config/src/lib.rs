//! Per-project build configuration for the docbuild service
//!
//! This crate discovers `readthedocs.yml` files under a project root, parses
//! each into one or more YAML documents, merges them with environment-supplied
//! defaults, and validates every recognized field against strict rules.

pub mod loader;
pub mod project;
pub mod schema;
pub mod validation;

pub use loader::{load, CONFIG_FILENAMES};
pub use project::ProjectConfig;
pub use schema::{BuildConfig, BuilderType, EnvConfig, PythonConfig};
pub use validation::{validate_bool, validate_choice, validate_directory, Validators};
