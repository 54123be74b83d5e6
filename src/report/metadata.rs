//! Complete per-field metadata: 32 properties as CSV and JSON
//!
//! Every record carries every key. Absent properties are empty strings, so the
//! CSV header and the JSON objects never vary between fields. `has_domain` and
//! `domain_name` describe the inline block on the field; the remaining
//! `domain_*` keys come from the workspace definition and stay empty when the
//! name does not resolve.

use super::tables;
use crate::domain::errors::ExportResult;
use crate::domain::schema::{DomainDefinition, DomainKind, ExtractedSchema, FieldDefinition};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Metadata keys in extraction order; the JSON objects keep this order
pub const METADATA_KEYS: [&str; 32] = [
    "name",
    "alias_name",
    "model_name",
    "type",
    "is_nullable",
    "length",
    "precision",
    "scale",
    "required",
    "editable",
    "default_value",
    "default_value_type",
    "xsi_type",
    "has_domain",
    "domain_name",
    "domain_type",
    "domain_field_type",
    "domain_merge_policy",
    "domain_split_policy",
    "domain_description",
    "domain_owner",
    "domain_values_count",
    "domain_min_value",
    "domain_max_value",
    "domain_min_value_type",
    "domain_max_value_type",
    "has_geometry_def",
    "geometry_type",
    "geometry_has_m",
    "geometry_has_z",
    "geometry_avg_points",
    "geometry_grid_size",
];

/// All metadata of one field, as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    values: [String; 32],
}

impl MetadataRecord {
    pub fn from_field(schema: &ExtractedSchema, field: &FieldDefinition) -> Self {
        let domain = schema.resolve(field).domain();
        let coded = domain.and_then(|d| match &d.kind {
            DomainKind::CodedValue(values) => Some(values),
            DomainKind::Range(_) => None,
        });
        let range = domain.and_then(|d| d.range());
        let geometry = field.geometry.as_ref();

        let values = [
            field.name.clone(),
            opt(&field.alias),
            opt(&field.model_name),
            field.field_type.as_str().to_string(),
            flag(field.is_nullable),
            count(field.length),
            count(field.precision),
            count(field.scale),
            flag(field.required),
            flag(field.editable),
            field
                .default_value
                .as_ref()
                .map(|v| v.text.clone())
                .unwrap_or_default(),
            field
                .default_value
                .as_ref()
                .and_then(|v| v.xsi_type.clone())
                .unwrap_or_default(),
            opt(&field.xsi_type),
            field.has_domain().to_string(),
            field.domain_name().unwrap_or_default().to_string(),
            domain.map(|d| d.xsi_type.clone()).unwrap_or_default(),
            domain_text(domain, |d| &d.field_type),
            domain_text(domain, |d| &d.merge_policy),
            domain_text(domain, |d| &d.split_policy),
            domain_text(domain, |d| &d.description),
            domain_text(domain, |d| &d.owner),
            coded.map(|values| values.len().to_string()).unwrap_or_default(),
            range.map(|r| r.min_text().to_string()).unwrap_or_default(),
            range.map(|r| r.max_text().to_string()).unwrap_or_default(),
            range.map(|r| r.min_type().to_string()).unwrap_or_default(),
            range.map(|r| r.max_type().to_string()).unwrap_or_default(),
            geometry.is_some().to_string(),
            geometry
                .and_then(|g| g.geometry_type.clone())
                .unwrap_or_default(),
            flag(geometry.and_then(|g| g.has_m)),
            flag(geometry.and_then(|g| g.has_z)),
            count(geometry.and_then(|g| g.avg_num_points)),
            geometry.and_then(|g| g.grid_size.clone()).unwrap_or_default(),
        ];

        Self { values }
    }

    /// Value of one metadata key
    pub fn get(&self, key: &str) -> Option<&str> {
        METADATA_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| self.values[i].as_str())
    }

    /// `(key, value)` pairs in extraction order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        METADATA_KEYS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(METADATA_KEYS.len()))?;
        for (key, value) in self.entries() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn domain_text<F>(domain: Option<&DomainDefinition>, get: F) -> String
where
    F: Fn(&DomainDefinition) -> &Option<String>,
{
    domain.and_then(|d| get(d).clone()).unwrap_or_default()
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

fn count(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// One record per field in document order
pub fn records(schema: &ExtractedSchema) -> Vec<MetadataRecord> {
    schema
        .fields
        .iter()
        .map(|field| MetadataRecord::from_field(schema, field))
        .collect()
}

/// Metadata CSV with alphabetically sorted columns
pub fn metadata_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let mut order: Vec<usize> = (0..METADATA_KEYS.len()).collect();
    order.sort_by_key(|&i| METADATA_KEYS[i]);

    let header: Vec<&str> = order.iter().map(|&i| METADATA_KEYS[i]).collect();
    let records = records(schema);
    let rows = records
        .iter()
        .map(|record| order.iter().map(|&i| record.values[i].as_str()).collect::<Vec<_>>());

    tables::render(header.as_slice(), rows)
}

/// Metadata JSON: an array of objects with keys in extraction order
pub fn metadata_json(schema: &ExtractedSchema) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(&records(schema))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_schema;
    use crate::fixtures;
    use crate::xml::XmlDocument;

    fn schema_from(xml: &str) -> ExtractedSchema {
        let doc = XmlDocument::parse(xml).unwrap();
        extract_schema(&doc, "Building_A").unwrap()
    }

    fn record(schema: &ExtractedSchema, name: &str) -> MetadataRecord {
        MetadataRecord::from_field(schema, schema.field(name).unwrap())
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys = METADATA_KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 32);
    }

    #[test]
    fn test_scenario_has_domain_flags() {
        let schema = schema_from(fixtures::SCENARIO_XML);
        let csv = metadata_csv(&schema).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let mut sorted: Vec<_> = headers.iter().collect();
        sorted.sort_unstable();
        assert_eq!(headers.iter().collect::<Vec<_>>(), sorted);
        assert_eq!(headers.len(), 32);

        let has_domain = headers.iter().position(|h| h == "has_domain").unwrap();
        let name = headers.iter().position(|h| h == "name").unwrap();
        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 3);
        let notes = rows.iter().find(|r| &r[name] == "notes").unwrap();
        assert_eq!(&notes[has_domain], "false");
        let status = rows.iter().find(|r| &r[name] == "status").unwrap();
        assert_eq!(&status[has_domain], "true");
    }

    #[test]
    fn test_dangling_domain_keeps_name_and_clears_details() {
        let schema = schema_from(fixtures::WORKSPACE_XML);
        let ghost = record(&schema, "ghost");

        assert_eq!(ghost.get("has_domain"), Some("true"));
        assert_eq!(ghost.get("domain_name"), Some("GhostDomain"));
        for key in [
            "domain_type",
            "domain_field_type",
            "domain_description",
            "domain_owner",
            "domain_values_count",
            "domain_min_value",
            "domain_max_value",
        ] {
            assert_eq!(ghost.get(key), Some(""), "{key} should be empty");
        }
    }

    #[test]
    fn test_resolved_domain_details() {
        let schema = schema_from(fixtures::WORKSPACE_XML);

        let status = record(&schema, "status");
        assert_eq!(status.get("domain_type"), Some("esri:CodedValueDomain"));
        assert_eq!(status.get("domain_values_count"), Some("2"));
        assert_eq!(status.get("domain_min_value"), Some(""));
        assert_eq!(status.get("default_value"), Some("1"));
        assert_eq!(status.get("default_value_type"), Some("xs:short"));
        assert_eq!(status.get("editable"), Some("true"));

        let area = record(&schema, "area");
        assert_eq!(area.get("domain_values_count"), Some(""));
        assert_eq!(area.get("domain_min_value"), Some("0"));
        assert_eq!(area.get("domain_max_value"), Some("10000"));
        assert_eq!(area.get("domain_max_value_type"), Some("xs:double"));
        assert_eq!(area.get("domain_owner"), Some("gis"));
    }

    #[test]
    fn test_geometry_columns() {
        let schema = schema_from(fixtures::WORKSPACE_XML);
        let shape = record(&schema, "SHAPE");

        assert_eq!(shape.get("has_geometry_def"), Some("true"));
        assert_eq!(shape.get("geometry_type"), Some("esriGeometryPolygon"));
        assert_eq!(shape.get("geometry_has_m"), Some("false"));
        assert_eq!(shape.get("geometry_has_z"), Some("true"));
        assert_eq!(shape.get("geometry_avg_points"), Some("0"));
        assert_eq!(shape.get("geometry_grid_size"), Some("0.0001"));

        let notes = record(&schema, "notes");
        assert_eq!(notes.get("has_geometry_def"), Some("false"));
        assert_eq!(notes.get("required"), Some(""));
        assert_eq!(notes.get("alias_name"), Some("Notes"));
    }

    #[test]
    fn test_json_keeps_extraction_order() {
        let schema = schema_from(fixtures::SCENARIO_XML);
        let json = metadata_json(&schema).unwrap();

        assert!(json
            .starts_with("[\n  {\n    \"name\": \"status\",\n    \"alias_name\": \"Status\","));
        assert!(!json.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let objects = value.as_array().unwrap();
        assert_eq!(objects.len(), 3);
        assert!(objects
            .iter()
            .all(|o| o.as_object().unwrap().len() == METADATA_KEYS.len()));
        assert_eq!(objects[2]["has_domain"], "false");
    }
}
