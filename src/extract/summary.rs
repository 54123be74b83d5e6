//! Aggregate statistics over an extracted schema

use crate::domain::schema::{DomainKind, DomainResolution, ExtractedSchema};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Field statistics reported by the `inspect` command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    pub feature_class: String,
    pub total_fields: usize,
    /// Field count per type, keyed by the short type name
    pub type_counts: BTreeMap<String, usize>,
    /// Fields carrying an inline domain block
    pub domain_fields: usize,
    pub coded_value_fields: usize,
    pub range_fields: usize,
    /// Fields whose inline domain names nothing in the workspace
    pub unresolved_fields: usize,
    pub default_value_fields: usize,
    pub geometry_fields: usize,
    pub nullable_fields: usize,
    /// Names of fields marked `Required`, in document order
    pub required_fields: Vec<String>,
    /// Every child tag used on the feature class's fields
    pub field_properties: BTreeSet<String>,
    pub workspace_domains: usize,
    /// Every feature class in the source document
    pub feature_classes: Vec<String>,
}

impl SchemaSummary {
    pub fn from_schema(schema: &ExtractedSchema) -> Self {
        let mut summary = Self {
            feature_class: schema.feature_class.clone(),
            total_fields: schema.fields.len(),
            workspace_domains: schema.domains.len(),
            ..Default::default()
        };

        for field in &schema.fields {
            *summary
                .type_counts
                .entry(field.field_type.short_name().to_string())
                .or_insert(0) += 1;

            if field.default_value.is_some() {
                summary.default_value_fields += 1;
            }
            if field.geometry.is_some() {
                summary.geometry_fields += 1;
            }
            if field.is_nullable == Some(true) {
                summary.nullable_fields += 1;
            }
            if field.required == Some(true) {
                summary.required_fields.push(field.name.clone());
            }

            match schema.resolve(field) {
                DomainResolution::None => {}
                DomainResolution::Unresolved { .. } => {
                    summary.domain_fields += 1;
                    summary.unresolved_fields += 1;
                }
                DomainResolution::Resolved(domain) => {
                    summary.domain_fields += 1;
                    match domain.kind {
                        DomainKind::CodedValue(_) => summary.coded_value_fields += 1,
                        DomainKind::Range(_) => summary.range_fields += 1,
                    }
                }
            }
        }

        summary
    }

    pub fn with_feature_classes(mut self, names: Vec<String>) -> Self {
        self.feature_classes = names;
        self
    }

    pub fn with_field_properties(mut self, properties: BTreeSet<String>) -> Self {
        self.field_properties = properties;
        self
    }

    /// Fields without an inline domain block
    pub fn simple_fields(&self) -> usize {
        self.total_fields - self.domain_fields
    }

    /// Plain-text rendering for terminal output
    pub fn format_display(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Feature class: {}\n", self.feature_class));
        out.push_str(&format!("Total fields: {}\n", self.total_fields));
        out.push_str(&format!(
            "Fields with domains: {} ({} coded value, {} range, {} unresolved)\n",
            self.domain_fields, self.coded_value_fields, self.range_fields, self.unresolved_fields
        ));
        out.push_str(&format!("Simple fields: {}\n", self.simple_fields()));
        out.push_str(&format!("Fields with default values: {}\n", self.default_value_fields));
        out.push_str(&format!("Geometry fields: {}\n", self.geometry_fields));
        out.push_str(&format!("Nullable fields: {}\n", self.nullable_fields));
        out.push_str(&format!(
            "Required fields ({}): {}\n",
            self.required_fields.len(),
            self.required_fields.join(", ")
        ));
        out.push_str(&format!("Workspace domains: {}\n", self.workspace_domains));

        out.push_str("\nField types:\n");
        for (field_type, count) in &self.type_counts {
            out.push_str(&format!("  {field_type}: {count}\n"));
        }

        if !self.field_properties.is_empty() {
            out.push_str(&format!("\nField properties ({}):\n", self.field_properties.len()));
            for property in &self.field_properties {
                out.push_str(&format!("  - {property}\n"));
            }
        }

        if !self.feature_classes.is_empty() {
            out.push_str(&format!(
                "\nFeature classes in document ({}):\n",
                self.feature_classes.len()
            ));
            for name in &self.feature_classes {
                out.push_str(&format!("  - {name}\n"));
            }
        }

        out
    }
}
