//! Configuration schema definitions

use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::env;
use std::path::{Path, PathBuf};
use types::{abspath, ConfigError, ErrorCode, InvalidConfig, Result, ValidationError};

use crate::validation::{display_value, Validators};

/// Supported documentation builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderType {
    Sphinx,
    SphinxHtmldir,
    SphinxSinglehtml,
}

impl BuilderType {
    /// Accepted spellings of the `type` field
    pub const ALL: [&'static str; 3] = ["sphinx", "sphinx_htmldir", "sphinx_singlehtml"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderType::Sphinx => "sphinx",
            BuilderType::SphinxHtmldir => "sphinx_htmldir",
            BuilderType::SphinxSinglehtml => "sphinx_singlehtml",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "sphinx" => Some(BuilderType::Sphinx),
            "sphinx_htmldir" => Some(BuilderType::SphinxHtmldir),
            "sphinx_singlehtml" => Some(BuilderType::SphinxSinglehtml),
            _ => None,
        }
    }
}

/// Validated `python` section with defaults applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Give the build virtualenv access to the system site-packages
    #[serde(default)]
    pub use_system_site_packages: bool,
    /// Run `setup.py install` before building
    #[serde(default)]
    pub setup_install: bool,
}

/// Environment-supplied defaults
///
/// Not user-authored: the build environment computes these once per
/// invocation and every document discovered in that load falls back to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Directory build artifacts are written under when a document does not
    /// carry its own `output_base`
    pub output_base: PathBuf,
}

impl EnvConfig {
    pub fn new(output_base: impl Into<PathBuf>) -> Self {
        Self {
            output_base: output_base.into(),
        }
    }

    /// Extract defaults from `DOCBUILD_`-prefixed environment variables
    pub fn from_env() -> Result<Self> {
        Figment::new()
            .merge(Env::prefixed("DOCBUILD_"))
            .extract()
            .map_err(|e| ConfigError::Environment(e.to_string()))
    }
}

/// One validated configuration document
///
/// Wraps the raw key/value mapping produced by the YAML parser together with
/// the environment defaults and the document's source identity. Recognized
/// fields are materialized into typed slots by the `validate_*` methods;
/// unrecognized keys stay reachable through [`BuildConfig::raw`].
#[derive(Debug, Clone)]
pub struct BuildConfig {
    env: EnvConfig,
    raw: Mapping,
    source_file: Option<PathBuf>,
    source_position: Option<usize>,
    validators: Validators,
    // Validated output, populated by the validator methods.
    name: Option<String>,
    build_type: Option<BuilderType>,
    base: Option<PathBuf>,
    python: Option<PythonConfig>,
    output_base: Option<PathBuf>,
}

impl BuildConfig {
    pub fn new(
        env: EnvConfig,
        raw: Mapping,
        source_file: Option<PathBuf>,
        source_position: Option<usize>,
    ) -> Self {
        Self::with_validators(env, raw, source_file, source_position, Validators::default())
    }

    /// Construct with a substituted validator strategy set
    pub fn with_validators(
        env: EnvConfig,
        raw: Mapping,
        source_file: Option<PathBuf>,
        source_position: Option<usize>,
        validators: Validators,
    ) -> Self {
        Self {
            env,
            raw,
            source_file,
            source_position,
            validators,
            name: None,
            build_type: None,
            base: None,
            python: None,
            output_base: None,
        }
    }

    /// Absolute path of the file this document came from, if any
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Zero-based index of this document within its source file, if any
    pub fn source_position(&self) -> Option<usize> {
        self.source_position
    }

    /// Environment defaults this document was loaded with
    pub fn env(&self) -> &EnvConfig {
        &self.env
    }

    /// Escape hatch: read an unvalidated key straight from the raw document
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Membership test against the validated output
    ///
    /// Recognized keys answer from their typed slot (present only once the
    /// matching validator has run); anything else falls back to the raw
    /// document.
    pub fn contains(&self, key: &str) -> bool {
        match key {
            "name" => self.name.is_some(),
            "type" => self.build_type.is_some(),
            "base" => self.base.is_some(),
            "python" => self.python.is_some(),
            "output_base" => self.output_base.is_some(),
            other => self.raw.contains_key(other),
        }
    }

    pub fn name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| not_validated("name"))
    }

    pub fn build_type(&self) -> Result<BuilderType> {
        self.build_type.ok_or_else(|| not_validated("type"))
    }

    pub fn base(&self) -> Result<&Path> {
        self.base.as_deref().ok_or_else(|| not_validated("base"))
    }

    pub fn python(&self) -> Result<&PythonConfig> {
        self.python.as_ref().ok_or_else(|| not_validated("python"))
    }

    pub fn output_base(&self) -> Result<&Path> {
        self.output_base
            .as_deref()
            .ok_or_else(|| not_validated("output_base"))
    }

    /// Require a string `name` safe to use as a directory segment
    pub fn validate_name(&mut self) -> Result<()> {
        let value = match self.raw.get("name") {
            None | Some(Value::Null) => {
                return Err(self.invalid("name", ErrorCode::NameRequired, "missing required field"))
            }
            Some(value) => value,
        };
        let name = value
            .as_str()
            .ok_or_else(|| self.invalid("name", ErrorCode::NameInvalid, "expected a string"))?;
        if name.is_empty() {
            return Err(self.invalid("name", ErrorCode::NameRequired, "missing required field"));
        }
        // Names become directory components downstream.
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(self.invalid(
                "name",
                ErrorCode::NameInvalid,
                "may only contain letters, digits, '-', '_' and '.'",
            ));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Require a `type` naming a supported builder
    pub fn validate_type(&mut self) -> Result<()> {
        let value = match self.raw.get("type") {
            None | Some(Value::Null) => {
                return Err(self.invalid("type", ErrorCode::TypeRequired, "missing required field"))
            }
            Some(value) => value,
        };
        let raw = match value.as_str() {
            Some(s) => s.to_string(),
            None => display_value(value),
        };
        let chosen = (self.validators.choice)(&raw, &BuilderType::ALL)
            .map_err(|e| self.invalid_from("type", e))?;
        self.build_type = Some(BuilderType::from_name(&chosen).ok_or_else(|| {
            self.invalid(
                "type",
                ErrorCode::InvalidChoice,
                format!("unknown builder type: {chosen}"),
            )
        })?);
        Ok(())
    }

    /// Resolve `base` to an absolute directory
    ///
    /// Defaults to the document's own source directory; an explicit value is
    /// resolved relative to it and must name an existing directory.
    pub fn validate_base(&mut self) -> Result<()> {
        let source_dir = self.source_directory();
        let base = match self.raw.get("base") {
            None | Some(Value::Null) => source_dir,
            Some(value) => (self.validators.directory)(value, &source_dir)
                .map_err(|e| self.invalid_from("base", e))?,
        };
        self.base = Some(base);
        Ok(())
    }

    /// Validate the optional `python` section and materialize its defaults
    pub fn validate_python(&mut self) -> Result<()> {
        let mut python = PythonConfig::default();
        if let Some(value) = self.raw.get("python") {
            if !value.is_null() {
                let section = value.as_mapping().ok_or_else(|| {
                    self.invalid("python", ErrorCode::PythonInvalid, "expected a mapping")
                })?;
                if let Some(raw) = section.get("use_system_site_packages") {
                    python.use_system_site_packages = (self.validators.bool_value)(raw)
                        .map_err(|e| self.invalid_from("python.use_system_site_packages", e))?;
                }
                if let Some(raw) = section.get("setup_install") {
                    python.setup_install = (self.validators.bool_value)(raw)
                        .map_err(|e| self.invalid_from("python.setup_install", e))?;
                }
            }
        }
        self.python = Some(python);
        Ok(())
    }

    /// Fill `output_base` from the environment defaults unless already set
    ///
    /// A value pre-seeded through [`crate::ProjectConfig::set_output_base`]
    /// wins over the environment default.
    pub fn validate_output_base(&mut self) -> Result<()> {
        if self.output_base.is_none() {
            let cwd = current_dir();
            self.output_base = Some(abspath(&cwd, &self.env.output_base));
        }
        Ok(())
    }

    /// Run every field validator in a fixed order
    ///
    /// Order is base, name, type, python, output_base; later validators may
    /// depend on earlier normalized values. Stops at the first failure.
    pub fn validate(&mut self) -> Result<()> {
        self.validate_base()?;
        self.validate_name()?;
        self.validate_type()?;
        self.validate_python()?;
        self.validate_output_base()?;
        Ok(())
    }

    pub(crate) fn set_output_base(&mut self, path: PathBuf) {
        self.output_base = Some(path);
    }

    /// Directory the document's relative paths resolve against
    fn source_directory(&self) -> PathBuf {
        let cwd = current_dir();
        match self.source_file.as_ref().and_then(|f| f.parent()) {
            Some(dir) if dir.as_os_str().is_empty() => cwd,
            Some(dir) => abspath(&cwd, dir),
            None => cwd,
        }
    }

    fn invalid(&self, key: &str, code: ErrorCode, message: impl Into<String>) -> ConfigError {
        ConfigError::Invalid(InvalidConfig {
            key: key.to_string(),
            code,
            message: message.into(),
            source_file: self.source_file.clone(),
            source_position: self.source_position,
        })
    }

    fn invalid_from(&self, key: &str, err: ValidationError) -> ConfigError {
        self.invalid(key, err.code, format!("invalid value: {}", err.value))
    }
}

fn not_validated(field: &str) -> ConfigError {
    ConfigError::FieldNotValidated {
        field: field.to_string(),
    }
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
