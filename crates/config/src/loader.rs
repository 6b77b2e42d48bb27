//! Configuration discovery and loading

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use types::{abspath, ConfigError, Result};

use crate::project::ProjectConfig;
use crate::schema::{BuildConfig, EnvConfig};
use crate::validation::display_value;

/// Recognized configuration filenames, in priority order
///
/// At most one file is taken per directory; the first name that exists wins.
pub const CONFIG_FILENAMES: [&str; 2] = ["readthedocs.yml", ".readthedocs.yml"];

/// Discover and validate every configuration document under `root`
///
/// Walks the tree, parses each recognized file into its ordered sequence of
/// YAML documents, builds one [`BuildConfig`] per document with the file's
/// absolute path and the document's zero-based position, wraps everything in
/// a [`ProjectConfig`] and validates it before returning. Fails with
/// [`ConfigError::NoConfigFound`] when the tree holds no configuration file
/// and with [`ConfigError::EmptyConfig`] when a file yields zero documents.
pub fn load(root: impl AsRef<Path>, env: &EnvConfig) -> Result<ProjectConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let root = abspath(&cwd, root.as_ref());

    let files = find_config_files(&root)?;
    if files.is_empty() {
        return Err(ConfigError::NoConfigFound { root });
    }

    let mut builds = Vec::new();
    for file in files {
        let text = fs::read_to_string(&file).map_err(|source| ConfigError::Io {
            path: file.clone(),
            source,
        })?;
        let documents = parse_documents(&text, &file)?;
        if documents.is_empty() {
            return Err(ConfigError::EmptyConfig { path: file });
        }
        debug!(file = %file.display(), documents = documents.len(), "parsed configuration file");
        for (position, raw) in documents.into_iter().enumerate() {
            builds.push(BuildConfig::new(
                env.clone(),
                raw,
                Some(file.clone()),
                Some(position),
            ));
        }
    }

    let mut project = ProjectConfig::new(builds);
    project.validate()?;
    info!(documents = project.len(), root = %root.display(), "loaded project configuration");
    Ok(project)
}

/// Find every configuration file under `dir`, deterministically
///
/// Pre-order depth-first: the directory's own file comes before anything in
/// its subdirectories, and subdirectories are recursed in byte-wise name
/// order. Document positions therefore run 0..k through a file before the
/// next file starts its own count at 0.
fn find_config_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for name in CONFIG_FILENAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            found.push(candidate);
            break;
        }
    }

    let entries = fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    for subdir in subdirs {
        walk(&subdir, found)?;
    }
    Ok(())
}

/// Parse one file's text into its ordered sequence of raw documents
///
/// Documents are separated by `---` markers. Null documents (empty stream
/// entries) are skipped; a non-mapping document is a parse error.
fn parse_documents(text: &str, path: &Path) -> Result<Vec<Mapping>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        match value {
            Value::Null => continue,
            Value::Mapping(mapping) => documents.push(mapping),
            other => {
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("document is not a mapping: {}", display_value(&other)),
                })
            }
        }
    }
    Ok(documents)
}
