//! Project-level aggregate over discovered build configurations

use std::env;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::slice;
use types::{abspath, Result};

use crate::schema::BuildConfig;

/// Ordered collection of every build configuration discovered under one
/// project root
///
/// Order is discovery order and stays stable across repeated loads of an
/// unchanged tree.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    builds: Vec<BuildConfig>,
}

impl ProjectConfig {
    pub fn new(builds: Vec<BuildConfig>) -> Self {
        Self { builds }
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BuildConfig> {
        self.builds.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, BuildConfig> {
        self.builds.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, BuildConfig> {
        self.builds.iter_mut()
    }

    /// Validate every member in order, propagating the first failure
    ///
    /// Callers that need partial results call the per-document validators
    /// themselves and inspect `source_file`/`source_position` of the failing
    /// member.
    pub fn validate(&mut self) -> Result<()> {
        for build in &mut self.builds {
            build.validate()?;
        }
        Ok(())
    }

    /// Assign `path`, resolved absolute against the current working
    /// directory, as the output base of every member
    ///
    /// Overrides any per-document default; a later `validate()` keeps the
    /// assigned value.
    pub fn set_output_base(&mut self, path: impl AsRef<Path>) {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let resolved = abspath(&cwd, path.as_ref());
        for build in &mut self.builds {
            build.set_output_base(resolved.clone());
        }
    }
}

impl Index<usize> for ProjectConfig {
    type Output = BuildConfig;

    fn index(&self, index: usize) -> &Self::Output {
        &self.builds[index]
    }
}

impl<'a> IntoIterator for &'a ProjectConfig {
    type Item = &'a BuildConfig;
    type IntoIter = slice::Iter<'a, BuildConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.builds.iter()
    }
}

impl<'a> IntoIterator for &'a mut ProjectConfig {
    type Item = &'a mut BuildConfig;
    type IntoIter = slice::IterMut<'a, BuildConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.builds.iter_mut()
    }
}

impl IntoIterator for ProjectConfig {
    type Item = BuildConfig;
    type IntoIter = std::vec::IntoIter<BuildConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.builds.into_iter()
    }
}
