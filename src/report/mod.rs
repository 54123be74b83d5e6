//! Artifact generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate schema objects to external formats
//! - ExtractedSchema (domain) is converted to CSV, JSON and HTML representations
//! - Each writer is a pure function owning the rules of its layout
//! - Domain logic remains pure while supporting multiple presentation needs

pub mod anchors;
pub mod html;
pub mod json;
pub mod manifest;
pub mod metadata;
pub mod tables;

use crate::config::{ExportConfig, ManualOptions};
use crate::domain::errors::{ExportError, ExportResult};
use crate::domain::schema::ExtractedSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

pub use anchors::{check_manual, ManualCheck};
pub use html::escape_html;
pub use manifest::{ArtifactRecord, ExportManifest, SourceInfo};
pub use metadata::MetadataRecord;

/// Every file an export run can produce
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Row per coded value or range, domain fields only
    DomainValuesCsv,
    /// Domain fields keyed by name
    DomainValuesJson,
    /// Row per coded value or range, with domain descriptions
    DomainDetailsCsv,
    /// Column per domain field, display values
    ColumnarCsv,
    /// Column per domain field, codes only
    ColumnarCodesCsv,
    /// All 32 metadata properties per field
    MetadataCsv,
    MetadataJson,
    /// One overview row per field
    FieldSummaryCsv,
    /// Navigable HTML reference
    Manual,
    /// Checksums of the source and every written artifact
    Manifest,
}

impl ArtifactKind {
    const ALL: [ArtifactKind; 10] = [
        Self::DomainValuesCsv,
        Self::DomainValuesJson,
        Self::DomainDetailsCsv,
        Self::ColumnarCsv,
        Self::ColumnarCodesCsv,
        Self::MetadataCsv,
        Self::MetadataJson,
        Self::FieldSummaryCsv,
        Self::Manual,
        Self::Manifest,
    ];

    pub fn all() -> &'static [ArtifactKind] {
        &Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DomainValuesCsv => "domain_values_csv",
            Self::DomainValuesJson => "domain_values_json",
            Self::DomainDetailsCsv => "domain_details_csv",
            Self::ColumnarCsv => "columnar_csv",
            Self::ColumnarCodesCsv => "columnar_codes_csv",
            Self::MetadataCsv => "metadata_csv",
            Self::MetadataJson => "metadata_json",
            Self::FieldSummaryCsv => "field_summary_csv",
            Self::Manual => "manual",
            Self::Manifest => "manifest",
        }
    }

    /// File name suffix appended to the lowercased feature class
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::DomainValuesCsv => "domains.csv",
            Self::DomainValuesJson => "domains.json",
            Self::DomainDetailsCsv => "domains_detailed.csv",
            Self::ColumnarCsv => "domains_columnar.csv",
            Self::ColumnarCodesCsv => "domains_codes_only.csv",
            Self::MetadataCsv => "complete_metadata.csv",
            Self::MetadataJson => "complete_metadata.json",
            Self::FieldSummaryCsv => "all_fields.csv",
            Self::Manual => "complete_manual.html",
            Self::Manifest => "export_manifest.json",
        }
    }

    pub fn default_file_name(&self, stem: &str) -> String {
        format!("{stem}_{}", self.suffix())
    }

    /// Whether the artifact is rendered from the schema alone.
    /// The manifest is assembled from the other artifacts after they are written.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, Self::Manifest)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = ExportError;

    /// Parse a kind from its snake_case name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ExportError::validation(format!("Unknown artifact kind: {s}")))
    }
}

/// Artifacts produced together by one export command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactGroup {
    Domains,
    Columnar,
    Metadata,
    Fields,
    Manual,
    All,
}

impl ArtifactGroup {
    pub fn kinds(&self) -> &'static [ArtifactKind] {
        use ArtifactKind::*;
        match self {
            Self::Domains => &[DomainValuesCsv, DomainValuesJson],
            Self::Columnar => &[ColumnarCsv, ColumnarCodesCsv],
            Self::Metadata => &[MetadataCsv, MetadataJson],
            Self::Fields => &[FieldSummaryCsv, DomainDetailsCsv],
            Self::Manual => &[Manual],
            Self::All => &[
                DomainValuesCsv,
                DomainValuesJson,
                DomainDetailsCsv,
                ColumnarCsv,
                ColumnarCodesCsv,
                MetadataCsv,
                MetadataJson,
                FieldSummaryCsv,
                Manual,
            ],
        }
    }
}

/// Options for customizing artifact output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// HTML manual rendering settings
    pub manual: ManualOptions,
    /// Resolved file names, referenced from the manual footer
    pub file_names: BTreeMap<ArtifactKind, String>,
}

impl ReportOptions {
    /// Default settings with file names derived from the schema's feature class
    pub fn for_schema(schema: &ExtractedSchema) -> Self {
        let stem = schema.file_stem();
        Self {
            manual: ManualOptions::default(),
            file_names: ArtifactKind::all()
                .iter()
                .map(|kind| (*kind, kind.default_file_name(&stem)))
                .collect(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            manual: config.manual.clone(),
            file_names: config.artifact_file_names(),
        }
    }

    pub fn file_name(&self, kind: ArtifactKind) -> &str {
        self.file_names.get(&kind).map(String::as_str).unwrap_or("")
    }
}

/// Dispatches each artifact kind to its writer
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Render one artifact as text
    pub fn format(&self, schema: &ExtractedSchema, kind: ArtifactKind) -> ExportResult<String> {
        match kind {
            ArtifactKind::DomainValuesCsv => tables::domain_values_csv(schema),
            ArtifactKind::DomainValuesJson => json::domain_values_json(schema),
            ArtifactKind::DomainDetailsCsv => tables::domain_details_csv(schema),
            ArtifactKind::ColumnarCsv => tables::columnar_csv(schema),
            ArtifactKind::ColumnarCodesCsv => tables::columnar_codes_csv(schema),
            ArtifactKind::MetadataCsv => metadata::metadata_csv(schema),
            ArtifactKind::MetadataJson => metadata::metadata_json(schema),
            ArtifactKind::FieldSummaryCsv => tables::field_summary_csv(schema),
            ArtifactKind::Manual => Ok(html::render_manual(schema, &self.options)),
            ArtifactKind::Manifest => Err(ExportError::validation(
                "the export manifest is assembled from written artifacts and cannot be rendered alone",
            )),
        }
    }

    /// Write a rendered artifact to a writer
    pub fn write_artifact<W: Write>(
        &self,
        schema: &ExtractedSchema,
        kind: ArtifactKind,
        mut writer: W,
    ) -> ExportResult<()> {
        let formatted = self.format(schema, kind)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_schema;
    use crate::fixtures;
    use crate::xml::XmlDocument;

    fn scenario() -> ExtractedSchema {
        let doc = XmlDocument::parse(fixtures::SCENARIO_XML).unwrap();
        extract_schema(&doc, "Building_A").unwrap()
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ArtifactKind::all() {
            assert_eq!(kind.as_str().parse::<ArtifactKind>().unwrap(), *kind);
        }
        let err = "pdf".parse::<ArtifactKind>().unwrap_err();
        assert!(err.to_string().contains("Unknown artifact kind: pdf"));
        assert_eq!(
            ArtifactKind::ColumnarCodesCsv.default_file_name("building_a"),
            "building_a_domains_codes_only.csv"
        );
    }

    #[test]
    fn test_all_group_covers_every_rendered_kind() {
        let rendered: Vec<_> = ArtifactKind::all()
            .iter()
            .copied()
            .filter(ArtifactKind::is_rendered)
            .collect();
        assert_eq!(ArtifactGroup::All.kinds(), rendered.as_slice());
    }

    #[test]
    fn test_every_rendered_kind_is_deterministic() {
        let schema = scenario();
        let formatter = ReportFormatter::new(ReportOptions::for_schema(&schema));

        for kind in ArtifactGroup::All.kinds() {
            let first = formatter.format(&schema, *kind).unwrap();
            let second = formatter.format(&schema, *kind).unwrap();
            assert_eq!(first, second, "{kind} differs between runs");
            assert!(!first.is_empty(), "{kind} rendered nothing");
        }
    }

    #[test]
    fn test_manifest_cannot_be_rendered_directly() {
        let schema = scenario();
        let formatter = ReportFormatter::new(ReportOptions::for_schema(&schema));
        assert!(formatter.format(&schema, ArtifactKind::Manifest).is_err());
    }

    #[test]
    fn test_write_artifact_to_buffer() {
        let schema = scenario();
        let formatter = ReportFormatter::new(ReportOptions::for_schema(&schema));

        let mut buffer = Vec::new();
        formatter
            .write_artifact(&schema, ArtifactKind::DomainValuesCsv, &mut buffer)
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Field Name,Field Alias,Domain Type"));
    }

    #[test]
    fn test_options_follow_config_overrides() {
        let config = crate::config::ConfigBuilder::new()
            .artifact_name(ArtifactKind::MetadataCsv, "meta.csv")
            .build()
            .unwrap();
        let options = ReportOptions::from_config(&config);
        assert_eq!(options.file_name(ArtifactKind::MetadataCsv), "meta.csv");
        assert_eq!(options.file_name(ArtifactKind::Manual), "building_a_complete_manual.html");
    }
}
