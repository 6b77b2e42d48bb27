//! Pure field validators
//!
//! Stateless checks with no knowledge of the document they validate. The
//! build configuration supplies context (key name, base directory) and
//! translates failures into fully-qualified `InvalidConfig` errors.

use serde_yaml::Value;
use std::path::{Path, PathBuf};
use types::{abspath, ErrorCode, ValidationError};

/// Validate a raw value as a boolean
///
/// Accepts YAML booleans, the integers 0 and 1, and the string spellings
/// `"true"`, `"false"`, `"0"`, `"1"` (words are case-insensitive). Anything
/// else fails with `INVALID_BOOL`.
pub fn validate_bool(value: &Value) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid_bool(value)),
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid_bool(value)),
        },
        _ => Err(invalid_bool(value)),
    }
}

fn invalid_bool(value: &Value) -> ValidationError {
    ValidationError::new(ErrorCode::InvalidBool, display_value(value))
}

/// Validate that `value` is a member of `allowed`
pub fn validate_choice(value: &str, allowed: &[&str]) -> Result<String, ValidationError> {
    if allowed.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::new(
            ErrorCode::InvalidChoice,
            format!("{value} (expected one of: {})", allowed.join(", ")),
        ))
    }
}

/// Validate a raw value as an existing directory
///
/// The value must be a YAML string (`BASE_INVALID` otherwise); it is resolved
/// against `base` and lexically normalized, and the result must be an
/// existing directory (`BASE_NOT_A_DIR` otherwise).
pub fn validate_directory(value: &Value, base: &Path) -> Result<PathBuf, ValidationError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ValidationError::new(ErrorCode::BaseInvalid, display_value(value)))?;
    let resolved = abspath(base, Path::new(raw));
    if !resolved.is_dir() {
        return Err(ValidationError::new(
            ErrorCode::BaseNotADir,
            resolved.display().to_string(),
        ));
    }
    Ok(resolved)
}

/// Render a raw YAML value for error messages
pub(crate) fn display_value(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| "<unprintable>".to_string())
}

/// Injectable validator strategies for a build configuration
///
/// Plain `fn` pointers keep the containing configuration `Clone` and `Debug`;
/// tests substitute individual entries instead of patching methods.
#[derive(Debug, Clone, Copy)]
pub struct Validators {
    pub bool_value: fn(&Value) -> Result<bool, ValidationError>,
    pub choice: fn(&str, &[&str]) -> Result<String, ValidationError>,
    pub directory: fn(&Value, &Path) -> Result<PathBuf, ValidationError>,
}

impl Default for Validators {
    fn default() -> Self {
        Self {
            bool_value: validate_bool,
            choice: validate_choice,
            directory: validate_directory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bool_accepts_literals() {
        assert_eq!(validate_bool(&Value::Bool(true)), Ok(true));
        assert_eq!(validate_bool(&Value::Bool(false)), Ok(false));
    }

    #[test]
    fn test_validate_bool_accepts_zero_and_one() {
        assert_eq!(validate_bool(&Value::from(0)), Ok(false));
        assert_eq!(validate_bool(&Value::from(1)), Ok(true));
    }

    #[test]
    fn test_validate_bool_accepts_string_spellings() {
        assert_eq!(validate_bool(&Value::from("true")), Ok(true));
        assert_eq!(validate_bool(&Value::from("False")), Ok(false));
        assert_eq!(validate_bool(&Value::from("1")), Ok(true));
        assert_eq!(validate_bool(&Value::from("0")), Ok(false));
    }

    #[test]
    fn test_validate_bool_rejects_everything_else() {
        for value in [
            Value::from("invalid"),
            Value::from(2),
            Value::from(1.5),
            Value::Sequence(vec![]),
            Value::Null,
        ] {
            let err = validate_bool(&value).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidBool);
        }
    }

    #[test]
    fn test_validate_choice() {
        let allowed = ["sphinx", "sphinx_htmldir"];
        assert_eq!(
            validate_choice("sphinx", &allowed),
            Ok("sphinx".to_string())
        );
        let err = validate_choice("unknown", &allowed).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChoice);
        assert!(err.value.contains("sphinx_htmldir"));
    }

    #[test]
    fn test_validate_directory_resolves_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        let resolved = validate_directory(&Value::from("docs"), dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("docs"));
    }

    #[test]
    fn test_validate_directory_rejects_non_strings() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_directory(&Value::from(1), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BaseInvalid);
    }

    #[test]
    fn test_validate_directory_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_directory(&Value::from("missing"), dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BaseNotADir);
    }
}
