//! Configuration loading and management for schema exports
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML is deserialized straight into typed settings with serde defaults
//! - Artifact file names are derived here so every writer agrees on them
//! - Command-line flags override loaded values before validation

use crate::domain::errors::{ExportError, ExportResult};
use crate::report::ArtifactKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration files probed in the working directory, in order
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "gdb_schema_export.yaml",
    "gdb_schema_export.yml",
    ".gdb_schema_export.yaml",
];

const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Main configuration structure for an export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Configuration format version
    pub version: String,
    /// Workspace export to read
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Feature class whose fields are exported
    #[serde(default = "default_feature_class")]
    pub feature_class: String,
    /// Directory receiving every artifact
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Per-artifact file name overrides
    #[serde(default)]
    pub artifacts: BTreeMap<ArtifactKind, String>,
    /// HTML manual settings
    #[serde(default)]
    pub manual: ManualOptions,
}

/// Rendering knobs for the HTML manual
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOptions {
    /// Coded-value domains with more entries than this are truncated
    #[serde(default = "default_large_domain_threshold")]
    pub large_domain_threshold: usize,
    /// Rows shown for a truncated domain
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    /// Page title; derived from the feature class when absent
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for ManualOptions {
    fn default() -> Self {
        Self {
            large_domain_threshold: default_large_domain_threshold(),
            preview_rows: default_preview_rows(),
            title: None,
        }
    }
}

impl ManualOptions {
    /// Title for the manual of `feature_class`
    pub fn title_for(&self, feature_class: &str) -> String {
        self.title.clone().unwrap_or_else(|| {
            format!("{feature_class} Feature Class - Complete Attribute Reference Manual")
        })
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("DATABASE_EXPORT.XML")
}

fn default_feature_class() -> String {
    "Building_A".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_large_domain_threshold() -> usize {
    50
}

fn default_preview_rows() -> usize {
    20
}

impl ExportConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            ExportError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            ExportError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> ExportResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ExportError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// First default configuration file present in `dir`
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            input: default_input(),
            feature_class: default_feature_class(),
            output_dir: default_output_dir(),
            artifacts: BTreeMap::new(),
            manual: ManualOptions::default(),
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> ExportResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(ExportError::config(format!(
                "Unsupported configuration version: {}. Supported versions: {}",
                self.version,
                SUPPORTED_VERSIONS.join(", ")
            )));
        }

        if self.feature_class.trim().is_empty() {
            return Err(ExportError::config("feature_class must not be empty"));
        }

        if self.manual.preview_rows == 0 {
            return Err(ExportError::config("manual.preview_rows must be at least 1"));
        }

        if self.manual.preview_rows > self.manual.large_domain_threshold {
            return Err(ExportError::config(format!(
                "manual.preview_rows ({}) must not exceed manual.large_domain_threshold ({})",
                self.manual.preview_rows, self.manual.large_domain_threshold
            )));
        }

        for (kind, name) in &self.artifacts {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(ExportError::config(format!(
                    "Invalid file name '{name}' for artifact '{kind}': expected a bare file name"
                )));
            }
        }

        // Two artifacts must never overwrite each other
        let mut seen = BTreeSet::new();
        for kind in ArtifactKind::all() {
            let name = self.artifact_file_name(*kind);
            if !seen.insert(name.clone()) {
                return Err(ExportError::config(format!(
                    "Artifact file name '{name}' is used more than once"
                )));
            }
        }

        Ok(())
    }

    /// File name of an artifact: the override, or `<feature_class>_<suffix>`
    pub fn artifact_file_name(&self, kind: ArtifactKind) -> String {
        self.artifacts
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_file_name(&self.feature_class.to_lowercase()))
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.output_dir.join(self.artifact_file_name(kind))
    }

    /// Resolved file name of every artifact
    pub fn artifact_file_names(&self) -> BTreeMap<ArtifactKind, String> {
        ArtifactKind::all()
            .iter()
            .map(|kind| (*kind, self.artifact_file_name(*kind)))
            .collect()
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> ExportResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::config(format!("Failed to serialize config: {e}")))
    }

    /// Create a fingerprint of the configuration, recorded in the manifest
    pub fn fingerprint(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.version.hash(&mut hasher);
        self.input.hash(&mut hasher);
        self.feature_class.hash(&mut hasher);
        self.output_dir.hash(&mut hasher);

        // BTreeMap iteration is already ordered
        for (kind, name) in &self.artifacts {
            kind.hash(&mut hasher);
            name.hash(&mut hasher);
        }

        self.manual.large_domain_threshold.hash(&mut hasher);
        self.manual.preview_rows.hash(&mut hasher);
        self.manual.title.hash(&mut hasher);

        format!("{:x}", hasher.finish())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: ExportConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ExportConfig::default(),
        }
    }

    /// Start from an already loaded configuration
    pub fn from_config(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn feature_class(mut self, name: impl Into<String>) -> Self {
        self.config.feature_class = name.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Override the file name of one artifact
    pub fn artifact_name(mut self, kind: ArtifactKind, name: impl Into<String>) -> Self {
        self.config.artifacts.insert(kind, name.into());
        self
    }

    pub fn large_domain_threshold(mut self, threshold: usize) -> Self {
        self.config.manual.large_domain_threshold = threshold;
        self
    }

    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.config.manual.preview_rows = rows;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.manual.title = Some(title.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ExportResult<ExportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
