//! Configuration loading and management.
//!
//! Analysis settings can be loaded from TOML, YAML, or JSON files, or discovered by walking
//! up from the current directory looking for `vizmetric.toml`.

use crate::analysis::scoring::ScoringWeights;
use crate::{Result, VizmetricError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for by [`AnalysisConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "vizmetric.toml";

/// Main analysis configuration.
///
/// # Example
///
/// ```rust
/// use vizmetric::core::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert!(!config.recursive);
///
/// // let config = AnalysisConfig::from_toml_file("vizmetric.toml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Scoring weights; omitted keys keep their defaults
    #[serde(default)]
    pub weights: ScoringWeights,

    /// Descend into subdirectories when analyzing a directory
    #[serde(default)]
    pub recursive: bool,

    /// Maximum concurrent analyses in batch operations (None = num_cpus * 2).
    #[serde(default)]
    pub max_concurrent_analyses: Option<usize>,
}

impl AnalysisConfig {
    /// Effective concurrency limit for batch runs. Never below 1.
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent_analyses.unwrap_or_else(|| num_cpus::get() * 2).max(1)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `VizmetricError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| VizmetricError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| VizmetricError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;
        serde_json::from_str(&content)
            .map_err(|e| VizmetricError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the parser from the file extension.
    ///
    /// `.yaml`/`.yml` and `.json` use their parsers; anything else is read as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `vizmetric.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(VizmetricError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using config file {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| VizmetricError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
