use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::options::ParsedOptions;

/// A trait that defines the behavior for loading option values from a source
/// other than the command line.
///
/// This lets the binary layer flags over values kept in a file without caring
/// how that file was written.
pub trait OptionsImporter {
    /// Reads `path` and returns the options it holds.
    ///
    /// # Arguments
    /// * `path`: The settings file to read.
    ///
    /// # Returns
    /// A `Result<ParsedOptions>`. Keys the file does not mention keep their
    /// defaults; unknown keys are an error.
    fn import(&self, path: &Path) -> Result<ParsedOptions>;
}

/// Imports settings files written in TOML, YAML or JSON.
///
/// The syntax is picked from the file extension, so `defaults.toml`,
/// `defaults.yaml` and `defaults.json` holding the same keys import to the
/// same `ParsedOptions`.
pub struct FileImporter;

impl FileImporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsImporter for FileImporter {
    fn import(&self, path: &Path) -> Result<ParsedOptions> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("toml") => toml::from_str(&content).context("Failed to parse TOML settings"),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).context("Failed to parse YAML settings")
            }
            Some("json") => {
                serde_json::from_str(&content).context("Failed to parse JSON settings")
            }
            _ => anyhow::bail!(
                "Unsupported settings file {}: expected a .toml, .yaml, .yml or .json extension",
                path.display()
            ),
        }
    }
}
