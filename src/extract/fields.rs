//! Feature class lookup and field extraction

use super::{data_elements, DataElementKind};
use crate::domain::errors::{ExportError, ExportResult, Structure};
use crate::domain::schema::{
    DomainReference, FieldDefinition, FieldType, GeometryDefinition, TypedValue,
};
use crate::xml::XmlElement;
use std::collections::{BTreeSet, HashSet};

/// Locate the feature class named `name` among all `DataElement` records
pub fn find_feature_class<'a>(
    root: &'a XmlElement,
    name: &str,
) -> ExportResult<&'a XmlElement> {
    data_elements(root)
        .find(|de| de.kind == DataElementKind::FeatureClass && de.name == Some(name))
        .map(|de| de.element)
        .ok_or_else(|| ExportError::not_found(Structure::FeatureClass, name))
}

/// Read the field array of a feature class in document order.
///
/// Fields without a name are skipped, and so is any field repeating an
/// earlier name; the first occurrence wins.
pub fn extract_fields(
    feature_class: &XmlElement,
    name: &str,
) -> ExportResult<Vec<FieldDefinition>> {
    let array = feature_class
        .find_typed("FieldArray", "ArrayOfField")
        .ok_or_else(|| ExportError::not_found(Structure::FieldArray, name))?;

    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for element in array
        .children_named("Field")
        .filter(|e| e.xsi_type_local() == Some("Field"))
    {
        let Some(field) = read_field(element) else {
            continue;
        };

        if !seen.insert(field.name.clone()) {
            tracing::warn!("Skipping duplicate field '{}' in '{}'", field.name, name);
            continue;
        }

        fields.push(field);
    }

    Ok(fields)
}

/// Every child tag seen on the feature class's fields, including ones not read
/// into [`FieldDefinition`]. Empty when the feature class has no field array.
pub fn field_properties(feature_class: &XmlElement) -> BTreeSet<String> {
    feature_class
        .find_typed("FieldArray", "ArrayOfField")
        .into_iter()
        .flat_map(|array| array.children_named("Field"))
        .flat_map(|field| field.children())
        .map(|child| child.local_name().to_string())
        .collect()
}

/// Read one `Field` element; `None` when it has no usable name
pub fn read_field(element: &XmlElement) -> Option<FieldDefinition> {
    let name = match element.child_text("Name") {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            tracing::warn!("Skipping field without a Name");
            return None;
        }
    };

    let text = |child: &str| element.child_text(child).map(str::to_string);

    Some(FieldDefinition {
        field_type: FieldType::parse(element.child_text("Type").unwrap_or_default()),
        alias: text("AliasName"),
        model_name: text("ModelName"),
        is_nullable: parse_flag(element.child_text("IsNullable")),
        length: parse_count(element.child_text("Length")),
        precision: parse_count(element.child_text("Precision")),
        scale: parse_count(element.child_text("Scale")),
        required: parse_flag(element.child_text("Required")),
        editable: parse_flag(element.child_text("Editable")),
        default_value: element.child("DefaultValue").map(|e| {
            TypedValue::new(e.text().unwrap_or_default(), e.xsi_type().map(str::to_string))
        }),
        xsi_type: element.xsi_type().map(str::to_string),
        domain: element.child("Domain").map(|d| DomainReference {
            name: d.child_text("DomainName").map(str::to_string),
            xsi_type: d.xsi_type().map(str::to_string),
        }),
        geometry: element.child("GeometryDef").map(read_geometry),
        name,
    })
}

fn read_geometry(element: &XmlElement) -> GeometryDefinition {
    GeometryDefinition {
        geometry_type: element.child_text("GeometryType").map(str::to_string),
        has_m: parse_flag(element.child_text("HasM")),
        has_z: parse_flag(element.child_text("HasZ")),
        avg_num_points: parse_count(element.child_text("AvgNumPoints")),
        grid_size: element.child_text("GridSize0").map(str::to_string),
    }
}

/// xs:boolean lexical forms
fn parse_flag(text: Option<&str>) -> Option<bool> {
    match text?.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_count(text: Option<&str>) -> Option<u32> {
    text?.trim().parse().ok()
}
