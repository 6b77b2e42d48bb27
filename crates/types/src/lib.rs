//! Shared types for the docbuild configuration core
//!
//! This crate contains the error taxonomy and path helpers used across the
//! docbuild workspace.

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, ErrorCode, InvalidConfig, Result, ValidationError};
pub use utils::{abspath, normalize_path};
