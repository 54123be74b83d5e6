//! Domain values as JSON keyed by field name

use crate::domain::errors::ExportResult;
use crate::domain::schema::{CodedValue, DomainKind, ExtractedSchema};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Domain of one field as written to the JSON export
#[derive(Debug, Serialize)]
pub struct DomainEntry<'a> {
    pub alias: &'a str,
    pub domain_name: &'a str,
    pub domain_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<&'a [CodedValue]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<&'a str>,
}

/// Field name to domain entry, serialized in field order
struct DomainValues<'a>(Vec<(&'a str, DomainEntry<'a>)>);

impl Serialize for DomainValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, entry) in &self.0 {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Entries for every field whose domain resolves, in document order
pub fn domain_entries(schema: &ExtractedSchema) -> Vec<(&str, DomainEntry<'_>)> {
    schema
        .resolved_fields()
        .map(|(field, domain)| {
            let mut entry = DomainEntry {
                alias: field.display_alias(),
                domain_name: &domain.name,
                domain_type: domain.kind.label(),
                values: None,
                min_value: None,
                max_value: None,
            };
            match &domain.kind {
                DomainKind::CodedValue(values) => entry.values = Some(values.as_slice()),
                DomainKind::Range(bounds) => {
                    entry.min_value = Some(bounds.min_text());
                    entry.max_value = Some(bounds.max_text());
                }
            }
            (field.name.as_str(), entry)
        })
        .collect()
}

pub fn domain_values_json(schema: &ExtractedSchema) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(&DomainValues(domain_entries(schema)))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_schema;
    use crate::fixtures;
    use crate::xml::XmlDocument;

    #[test]
    fn test_scenario_json_layout() {
        let doc = XmlDocument::parse(fixtures::SCENARIO_XML).unwrap();
        let schema = extract_schema(&doc, "Building_A").unwrap();
        let json = domain_values_json(&schema).unwrap();

        let expected = r#"{
  "status": {
    "alias": "Status",
    "domain_name": "StatusDomain",
    "domain_type": "CodedValue",
    "values": [
      {
        "name": "Active",
        "code": "1"
      },
      {
        "name": "Inactive",
        "code": "0"
      }
    ]
  },
  "area": {
    "alias": "Footprint Area",
    "domain_name": "AreaDomain",
    "domain_type": "Range",
    "min_value": "0",
    "max_value": "10000"
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_dangling_and_plain_fields_are_omitted() {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        let schema = extract_schema(&doc, "Building_A").unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&domain_values_json(&schema).unwrap()).unwrap();

        let object = value.as_object().unwrap();
        assert!(object.contains_key("condition"));
        assert!(!object.contains_key("ghost"));
        assert!(!object.contains_key("notes"));
        assert_eq!(object["condition"]["values"].as_array().unwrap().len(), 3);
    }
}
