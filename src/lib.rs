//! gdb-schema-export - Field and domain references from geodatabase XML exports
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Pure schema model separated from XML parsing and output formats
//! - One parse per run; every artifact is rendered from the same extracted schema
//! - All artifacts are rendered before the first file is written

pub mod config;
pub mod domain;
pub mod extract;
pub mod report;
pub mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main types for convenient access
pub use domain::errors::{ExportError, ExportResult, Structure};
pub use domain::schema::{
    CodedValue, DomainCatalog, DomainDefinition, DomainKind, DomainResolution, ExtractedSchema,
    FieldDefinition, FieldType, GeometryDefinition,
};

pub use config::{ConfigBuilder, ExportConfig, ManualOptions};

pub use extract::{extract_schema, list_feature_classes, SchemaSummary};

pub use report::{
    ArtifactGroup, ArtifactKind, ArtifactRecord, ExportManifest, ManualCheck, ReportFormatter,
    ReportOptions, SourceInfo,
};

pub use xml::XmlDocument;

use std::fs;
use std::path::{Path, PathBuf};

/// Main exporter providing high-level extraction and export operations
pub struct SchemaExporter {
    config: ExportConfig,
    report_formatter: ReportFormatter,
}

/// The input document held in memory for one run
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

impl SourceDocument {
    pub fn info(&self) -> SourceInfo {
        SourceInfo::from_content(&self.path, self.text.as_bytes())
    }
}

/// A rendered artifact not yet written
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub content: String,
}

/// What an export run produced
#[derive(Debug, Clone)]
pub struct ExportRun {
    pub schema: ExtractedSchema,
    pub output_dir: PathBuf,
    /// Written artifacts in write order
    pub artifacts: Vec<ArtifactRecord>,
    /// Present when the run also wrote a manifest
    pub manifest: Option<ExportManifest>,
}

impl ExportRun {
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.artifacts
            .iter()
            .map(|record| self.output_dir.join(&record.file_name))
    }
}

impl SchemaExporter {
    /// Create an exporter with the given configuration
    pub fn new_with_config(config: ExportConfig) -> ExportResult<Self> {
        config.validate()?;
        let report_formatter = ReportFormatter::new(ReportOptions::from_config(&config));

        Ok(Self {
            config,
            report_formatter,
        })
    }

    /// Create an exporter with default configuration
    pub fn new() -> ExportResult<Self> {
        Self::new_with_config(ExportConfig::default())
    }

    /// Create an exporter loading configuration from file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> ExportResult<Self> {
        let config = ExportConfig::load_from_file(path)?;
        Self::new_with_config(config)
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Read the configured input document
    pub fn load_source(&self) -> ExportResult<SourceDocument> {
        let path = &self.config.input;
        let text = fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read '{}': {e}", path.display()))
        })?;

        tracing::debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(SourceDocument {
            path: path.clone(),
            text,
        })
    }

    /// Parse a source document and extract the configured feature class
    pub fn extract(&self, source: &SourceDocument) -> ExportResult<ExtractedSchema> {
        let document = XmlDocument::parse(&source.text)?;
        extract_schema(&document, &self.config.feature_class)
    }

    /// Read, parse and extract in one step
    pub fn load_schema(&self) -> ExportResult<ExtractedSchema> {
        let source = self.load_source()?;
        self.extract(&source)
    }

    /// Schema statistics plus the feature classes present in the document
    pub fn inspect(&self) -> ExportResult<SchemaSummary> {
        let source = self.load_source()?;
        let document = XmlDocument::parse(&source.text)?;
        let schema = extract_schema(&document, &self.config.feature_class)?;
        let feature_class = extract::find_feature_class(document.root(), &schema.feature_class)?;

        Ok(SchemaSummary::from_schema(&schema)
            .with_feature_classes(list_feature_classes(document.root()))
            .with_field_properties(extract::field_properties(feature_class)))
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.config.artifact_path(kind)
    }

    /// Render the requested artifacts without touching the filesystem
    pub fn render(
        &self,
        schema: &ExtractedSchema,
        kinds: &[ArtifactKind],
    ) -> ExportResult<Vec<RenderedArtifact>> {
        kinds
            .iter()
            .map(|kind| {
                Ok(RenderedArtifact {
                    kind: *kind,
                    file_name: self.config.artifact_file_name(*kind),
                    content: self.report_formatter.format(schema, *kind)?,
                })
            })
            .collect()
    }

    /// Render every requested artifact, then write them all
    pub fn export(
        &self,
        schema: &ExtractedSchema,
        kinds: &[ArtifactKind],
    ) -> ExportResult<Vec<ArtifactRecord>> {
        let rendered = self.render(schema, kinds)?;
        self.write_rendered(&rendered)
    }

    fn write_rendered(&self, rendered: &[RenderedArtifact]) -> ExportResult<Vec<ArtifactRecord>> {
        fs::create_dir_all(&self.config.output_dir)?;

        let mut records = Vec::with_capacity(rendered.len());
        for artifact in rendered {
            let path = self.config.output_dir.join(&artifact.file_name);
            fs::write(&path, &artifact.content)?;
            tracing::debug!("Wrote {} ({} bytes)", path.display(), artifact.content.len());

            records.push(ArtifactRecord::new(
                artifact.kind,
                artifact.file_name.clone(),
                artifact.content.as_bytes(),
            ));
        }

        Ok(records)
    }

    /// Export one artifact group from a single parse of the input
    pub fn run(&self, group: ArtifactGroup) -> ExportResult<ExportRun> {
        let source = self.load_source()?;
        let schema = self.extract(&source)?;
        let mut artifacts = self.export(&schema, group.kinds())?;

        let manifest = if group == ArtifactGroup::All {
            let mut manifest = ExportManifest::new(
                &schema.feature_class,
                self.config.fingerprint(),
                source.info(),
            );
            for record in &artifacts {
                manifest.record(record.clone());
            }

            let file_name = self.config.artifact_file_name(ArtifactKind::Manifest);
            let content = manifest.to_json()?;
            fs::write(self.config.output_dir.join(&file_name), &content)?;
            artifacts.push(ArtifactRecord::new(
                ArtifactKind::Manifest,
                file_name,
                content.as_bytes(),
            ));
            Some(manifest)
        } else {
            None
        };

        Ok(ExportRun {
            schema,
            output_dir: self.config.output_dir.clone(),
            artifacts,
            manifest,
        })
    }

    /// Check a manual on disk; defaults to the configured manual path.
    /// Field anchors are verified against the input when it can be loaded.
    pub fn check_manual(&self, path: Option<&Path>) -> ExportResult<ManualCheck> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.artifact_path(ArtifactKind::Manual));
        let html = fs::read_to_string(&path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read '{}': {e}", path.display()))
        })?;

        let schema = match self.load_schema() {
            Ok(schema) => Some(schema),
            Err(e) => {
                tracing::warn!("Checking links only; schema unavailable: {}", e);
                None
            }
        };

        report::check_manual(&html, schema.as_ref())
    }
}

/// Convenience function to create an exporter with default settings
pub fn create_exporter() -> ExportResult<SchemaExporter> {
    SchemaExporter::new()
}

/// Convenience function to extract one feature class from a file
pub fn extract_from_file<P: AsRef<Path>>(
    path: P,
    feature_class: &str,
) -> ExportResult<ExtractedSchema> {
    let document = XmlDocument::load_from_file(path)?;
    extract_schema(&document, feature_class)
}

/// Convenience function to write every artifact for one feature class
pub fn export_all<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    feature_class: &str,
    output_dir: Q,
) -> ExportResult<ExportRun> {
    let config = ConfigBuilder::new()
        .input(input.as_ref())
        .feature_class(feature_class)
        .output_dir(output_dir.as_ref())
        .build()?;

    SchemaExporter::new_with_config(config)?.run(ArtifactGroup::All)
}
