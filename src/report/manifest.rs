//! Export manifest: checksums of the source document and written artifacts

use super::ArtifactKind;
use crate::domain::errors::ExportResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// The workspace export an artifact set was produced from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

/// One written artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub bytes: u64,
    pub sha256: String,
}

impl ArtifactRecord {
    pub fn new(kind: ArtifactKind, file_name: impl Into<String>, content: &[u8]) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            bytes: content.len() as u64,
            sha256: sha256_hex(content),
        }
    }
}

/// Everything needed to verify an artifact set against its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub tool_version: String,
    pub feature_class: String,
    pub config_fingerprint: String,
    pub source: SourceInfo,
    pub artifacts: Vec<ArtifactRecord>,
}

impl ExportManifest {
    pub fn new(
        feature_class: impl Into<String>,
        config_fingerprint: impl Into<String>,
        source: SourceInfo,
    ) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            feature_class: feature_class.into(),
            config_fingerprint: config_fingerprint.into(),
            source,
            artifacts: Vec::new(),
        }
    }

    pub fn record(&mut self, record: ArtifactRecord) {
        self.artifacts.push(record);
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactRecord> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Artifacts whose file in `dir` is missing or no longer matches its checksum
    pub fn stale_artifacts(&self, dir: &Path) -> Vec<&ArtifactRecord> {
        self.artifacts
            .iter()
            .filter(|record| match std::fs::read(dir.join(&record.file_name)) {
                Ok(content) => sha256_hex(&content) != record.sha256,
                Err(_) => true,
            })
            .collect()
    }
}

impl SourceInfo {
    pub fn from_content(path: &Path, content: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            bytes: content.len() as u64,
            sha256: sha256_hex(content),
        }
    }
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
