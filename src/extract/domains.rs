//! Workspace domain extraction

use crate::domain::errors::{ExportError, ExportResult, Structure};
use crate::domain::schema::{
    CodedValue, DomainCatalog, DomainDefinition, DomainKind, RangeBounds, TypedValue,
};
use crate::xml::XmlElement;

/// Build the domain catalog from the workspace `Domains` collection.
///
/// Domains without a name or with an unsupported kind are skipped with a
/// warning; the rest of the collection is still read.
pub fn extract_domains(root: &XmlElement) -> ExportResult<DomainCatalog> {
    let collection = root
        .find_typed("Domains", "ArrayOfDomain")
        .ok_or_else(|| ExportError::not_found(Structure::DomainCollection, "Domains"))?;

    let catalog: DomainCatalog = collection
        .children_named("Domain")
        .filter_map(read_domain)
        .collect();

    tracing::debug!("Found {} domain definitions at workspace level", catalog.len());
    Ok(catalog)
}

/// Read one `Domain` element
pub fn read_domain(element: &XmlElement) -> Option<DomainDefinition> {
    let Some(name) = element.child_text("DomainName") else {
        tracing::warn!("Skipping workspace domain without a DomainName");
        return None;
    };

    let kind = match element.xsi_type_local() {
        Some("CodedValueDomain") => DomainKind::CodedValue(read_coded_values(element)),
        Some("RangeDomain") => DomainKind::Range(read_range(element)),
        other => {
            tracing::warn!(
                "Skipping domain '{}' with unsupported type '{}'",
                name,
                other.unwrap_or("")
            );
            return None;
        }
    };

    Some(DomainDefinition {
        name: name.to_string(),
        xsi_type: element.xsi_type().unwrap_or_default().to_string(),
        description: owned(element.child_text("Description")),
        owner: owned(element.child_text("Owner")),
        field_type: owned(element.child_text("FieldType")),
        merge_policy: owned(element.child_text("MergePolicy")),
        split_policy: owned(element.child_text("SplitPolicy")),
        kind,
    })
}

fn read_coded_values(domain: &XmlElement) -> Vec<CodedValue> {
    let Some(array) = domain
        .children_named("CodedValues")
        .find(|e| e.xsi_type_local() == Some("ArrayOfCodedValue"))
    else {
        return Vec::new();
    };

    array
        .children_named("CodedValue")
        .filter(|e| e.xsi_type_local() == Some("CodedValue"))
        .map(|value| {
            CodedValue::new(
                value.child_text("Name").unwrap_or_default(),
                value.child_text("Code").unwrap_or_default(),
            )
        })
        .collect()
}

fn read_range(domain: &XmlElement) -> RangeBounds {
    let bound = |name: &str| {
        domain.child(name).map(|e| {
            TypedValue::new(e.text().unwrap_or_default(), e.xsi_type().map(str::to_string))
        })
    };

    RangeBounds {
        min: bound("MinValue"),
        max: bound("MaxValue"),
    }
}

fn owned(text: Option<&str>) -> Option<String> {
    text.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::xml::XmlDocument;

    #[test]
    fn test_coded_values_keep_document_order() {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        let catalog = extract_domains(doc.root()).unwrap();

        let status = catalog.get("StatusDomain").unwrap();
        assert!(status.is_coded());
        let pairs: Vec<_> = status
            .coded_values()
            .iter()
            .map(|v| (v.name.as_str(), v.code.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Active", "1"), ("Inactive", "0")]);
        assert_eq!(status.description.as_deref(), Some("Operational status"));
        assert_eq!(status.merge_policy.as_deref(), Some("esriMPTDefaultValue"));
    }

    #[test]
    fn test_range_domain_bounds() {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        let catalog = extract_domains(doc.root()).unwrap();

        let area = catalog.get("AreaDomain").unwrap();
        let bounds = area.range().unwrap();
        assert_eq!(bounds.min_text(), "0");
        assert_eq!(bounds.max_text(), "10000");
        assert_eq!(bounds.min_type(), "xs:double");
        assert!(area.coded_values().is_empty());
        assert_eq!(area.owner.as_deref(), Some("gis"));
    }

    #[test]
    fn test_nameless_and_unknown_domains_are_skipped() {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        let catalog = extract_domains(doc.root()).unwrap();

        // StatusDomain, AreaDomain, ConditionDomain survive; the nameless and
        // the unsupported entries do not.
        let names: Vec<_> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["StatusDomain", "AreaDomain", "ConditionDomain"]);
    }

    #[test]
    fn test_duplicate_codes_are_kept() {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        let catalog = extract_domains(doc.root()).unwrap();

        let codes: Vec<_> = catalog
            .get("ConditionDomain")
            .unwrap()
            .coded_values()
            .iter()
            .map(|v| v.code.as_str())
            .collect();
        assert_eq!(codes, vec!["G", "F", "F"]);
    }

    #[test]
    fn test_missing_collection_is_structural() {
        let doc = XmlDocument::parse("<Workspace><WorkspaceDefinition/></Workspace>").unwrap();
        let err = extract_domains(doc.root()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::NotFound { structure: Structure::DomainCollection, .. }
        ));
    }
}
