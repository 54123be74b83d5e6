//! Schema extraction from a parsed workspace export
//!
//! CDD Principle: Domain Services - extractors translate the XML tree into schema entities
//! - DataElement records are classified once by their `xsi:type` discriminator
//! - Domains and fields are extracted independently and joined by name afterwards
//! - Missing optional properties never fail an extraction; missing structures do

pub mod domains;
pub mod fields;
pub mod summary;

use crate::domain::errors::ExportResult;
use crate::domain::schema::ExtractedSchema;
use crate::xml::{strip_prefix, XmlDocument, XmlElement};

pub use domains::extract_domains;
pub use fields::{extract_fields, field_properties, find_feature_class};
pub use summary::SchemaSummary;

/// Kind of a `DataElement` record, decoded from its `xsi:type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataElementKind {
    FeatureClass,
    Table,
    FeatureDataset,
    Other(String),
}

impl DataElementKind {
    pub fn from_xsi_type(value: &str) -> Self {
        match strip_prefix(value) {
            "DEFeatureClass" => Self::FeatureClass,
            "DETable" => Self::Table,
            "DEFeatureDataset" => Self::FeatureDataset,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A classified `DataElement` node
#[derive(Debug, Clone)]
pub struct DataElement<'a> {
    pub kind: DataElementKind,
    pub name: Option<&'a str>,
    pub element: &'a XmlElement,
}

/// Every typed `DataElement` below `root`, in document order
pub fn data_elements(root: &XmlElement) -> impl Iterator<Item = DataElement<'_>> {
    root.descendants()
        .filter(|e| e.local_name() == "DataElement")
        .filter_map(|element| {
            let kind = DataElementKind::from_xsi_type(element.xsi_type()?);
            Some(DataElement {
                kind,
                name: element.child_text("Name"),
                element,
            })
        })
}

/// Names of all feature classes in the document
pub fn list_feature_classes(root: &XmlElement) -> Vec<String> {
    data_elements(root)
        .filter(|de| de.kind == DataElementKind::FeatureClass)
        .filter_map(|de| de.name.map(str::to_string))
        .collect()
}

/// Run both extractors for one feature class and bundle the result
pub fn extract_schema(
    document: &XmlDocument,
    feature_class: &str,
) -> ExportResult<ExtractedSchema> {
    let root = document.root();

    let domains = extract_domains(root)?;
    let element = find_feature_class(root, feature_class)?;
    let fields = extract_fields(element, feature_class)?;

    let schema = ExtractedSchema::new(feature_class, fields, domains);

    for field in schema.unresolved_fields() {
        tracing::warn!(
            "Field '{}' references domain '{}' which is not defined in the workspace",
            field.name,
            field.domain_name().unwrap_or("")
        );
    }

    tracing::debug!(
        "Extracted {} fields ({} with resolved domains) from '{}'",
        schema.fields.len(),
        schema.resolved_fields().count(),
        feature_class
    );

    Ok(schema)
}
