//! Core schema models: fields, domains and geometry definitions
//!
//! Architecture: Rich Domain Models - the extracted schema is an aggregate root
//! - FieldDefinition and DomainDefinition are read-only values built once per run
//! - DomainCatalog owns workspace domains in document order with by-name lookup
//! - ExtractedSchema joins fields to domains without ever failing on a dangling name

use serde::Serialize;
use std::collections::HashMap;

/// Declared type of a field, decoded from its `esriFieldType*` tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    SmallInteger,
    Integer,
    BigInteger,
    Single,
    Double,
    String,
    Date,
    DateOnly,
    TimeOnly,
    TimestampOffset,
    Oid,
    Geometry,
    Blob,
    Raster,
    Guid,
    GlobalId,
    Xml,
    /// Tag outside the known enumeration, kept verbatim
    Other(String),
}

impl FieldType {
    const PREFIX: &'static str = "esriFieldType";

    /// Decode a type tag such as `esriFieldTypeString`
    pub fn parse(tag: &str) -> Self {
        match tag.strip_prefix(Self::PREFIX).unwrap_or("") {
            "SmallInteger" => Self::SmallInteger,
            "Integer" => Self::Integer,
            "BigInteger" => Self::BigInteger,
            "Single" => Self::Single,
            "Double" => Self::Double,
            "String" => Self::String,
            "Date" => Self::Date,
            "DateOnly" => Self::DateOnly,
            "TimeOnly" => Self::TimeOnly,
            "TimestampOffset" => Self::TimestampOffset,
            "OID" => Self::Oid,
            "Geometry" => Self::Geometry,
            "Blob" => Self::Blob,
            "Raster" => Self::Raster,
            "GUID" => Self::Guid,
            "GlobalID" => Self::GlobalId,
            "XML" => Self::Xml,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Full tag as it appears in the export
    pub fn as_str(&self) -> &str {
        match self {
            Self::SmallInteger => "esriFieldTypeSmallInteger",
            Self::Integer => "esriFieldTypeInteger",
            Self::BigInteger => "esriFieldTypeBigInteger",
            Self::Single => "esriFieldTypeSingle",
            Self::Double => "esriFieldTypeDouble",
            Self::String => "esriFieldTypeString",
            Self::Date => "esriFieldTypeDate",
            Self::DateOnly => "esriFieldTypeDateOnly",
            Self::TimeOnly => "esriFieldTypeTimeOnly",
            Self::TimestampOffset => "esriFieldTypeTimestampOffset",
            Self::Oid => "esriFieldTypeOID",
            Self::Geometry => "esriFieldTypeGeometry",
            Self::Blob => "esriFieldTypeBlob",
            Self::Raster => "esriFieldTypeRaster",
            Self::Guid => "esriFieldTypeGUID",
            Self::GlobalId => "esriFieldTypeGlobalID",
            Self::Xml => "esriFieldTypeXML",
            Self::Other(tag) => tag,
        }
    }

    /// Tag without the `esriFieldType` prefix, used for display badges
    pub fn short_name(&self) -> &str {
        let tag = self.as_str();
        tag.strip_prefix(Self::PREFIX).unwrap_or(tag)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar value together with its declared `xsi:type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedValue {
    pub text: String,
    pub xsi_type: Option<String>,
}

impl TypedValue {
    pub fn new(text: impl Into<String>, xsi_type: Option<String>) -> Self {
        Self {
            text: text.into(),
            xsi_type,
        }
    }
}

/// One entry of a coded-value domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodedValue {
    /// Display name
    pub name: String,
    /// Stored code
    pub code: String,
}

impl CodedValue {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// `name (code)` rendering used by columnar and summary outputs
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// Closed interval of a range domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: Option<TypedValue>,
    pub max: Option<TypedValue>,
}

impl RangeBounds {
    pub fn min_text(&self) -> &str {
        self.min.as_ref().map(|v| v.text.as_str()).unwrap_or("")
    }

    pub fn max_text(&self) -> &str {
        self.max.as_ref().map(|v| v.text.as_str()).unwrap_or("")
    }

    pub fn min_type(&self) -> &str {
        self.min.as_ref().and_then(|v| v.xsi_type.as_deref()).unwrap_or("")
    }

    pub fn max_type(&self) -> &str {
        self.max.as_ref().and_then(|v| v.xsi_type.as_deref()).unwrap_or("")
    }

    /// `min to max`
    pub fn describe(&self) -> String {
        format!("{} to {}", self.min_text(), self.max_text())
    }
}

/// What a domain constrains its fields to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainKind {
    /// Ordered list of (display name, code) pairs in document order
    CodedValue(Vec<CodedValue>),
    /// Numeric interval
    Range(RangeBounds),
}

impl DomainKind {
    /// Label written to CSV and JSON outputs
    pub fn label(&self) -> &'static str {
        match self {
            Self::CodedValue(_) => "CodedValue",
            Self::Range(_) => "Range",
        }
    }
}

/// A workspace-level domain shared by reference across fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDefinition {
    pub name: String,
    /// Raw `xsi:type`, e.g. `esri:CodedValueDomain`
    pub xsi_type: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub field_type: Option<String>,
    pub merge_policy: Option<String>,
    pub split_policy: Option<String>,
    pub kind: DomainKind,
}

impl DomainDefinition {
    /// Coded values, empty for range domains
    pub fn coded_values(&self) -> &[CodedValue] {
        match &self.kind {
            DomainKind::CodedValue(values) => values,
            DomainKind::Range(_) => &[],
        }
    }

    pub fn range(&self) -> Option<&RangeBounds> {
        match &self.kind {
            DomainKind::Range(bounds) => Some(bounds),
            DomainKind::CodedValue(_) => None,
        }
    }

    pub fn is_coded(&self) -> bool {
        matches!(self.kind, DomainKind::CodedValue(_))
    }
}

/// Inline `Domain` block found on a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReference {
    pub name: Option<String>,
    pub xsi_type: Option<String>,
}

/// Spatial representation attached to the shape field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryDefinition {
    pub geometry_type: Option<String>,
    pub has_m: Option<bool>,
    pub has_z: Option<bool>,
    pub avg_num_points: Option<u32>,
    /// `GridSize0`, kept as source text
    pub grid_size: Option<String>,
}

/// One column definition of a feature class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub alias: Option<String>,
    pub model_name: Option<String>,
    pub field_type: FieldType,
    pub is_nullable: Option<bool>,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub required: Option<bool>,
    pub editable: Option<bool>,
    pub default_value: Option<TypedValue>,
    /// Raw `xsi:type` of the field element
    pub xsi_type: Option<String>,
    pub domain: Option<DomainReference>,
    pub geometry: Option<GeometryDefinition>,
}

impl FieldDefinition {
    /// Create a field with only a name and type set
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            model_name: None,
            field_type,
            is_nullable: None,
            length: None,
            precision: None,
            scale: None,
            required: None,
            editable: None,
            default_value: None,
            xsi_type: None,
            domain: None,
            geometry: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_domain(mut self, domain_name: impl Into<String>) -> Self {
        self.domain = Some(DomainReference {
            name: Some(domain_name.into()),
            xsi_type: None,
        });
        self
    }

    /// Alias when present, otherwise the raw name
    pub fn display_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Whether an inline domain block exists, resolvable or not
    pub fn has_domain(&self) -> bool {
        self.domain.is_some()
    }

    /// Name given by the inline domain block
    pub fn domain_name(&self) -> Option<&str> {
        self.domain.as_ref().and_then(|d| d.name.as_deref())
    }
}

/// Workspace domains in document order with lookup by name
#[derive(Debug, Clone, Default)]
pub struct DomainCatalog {
    domains: Vec<DomainDefinition>,
    index: HashMap<String, usize>,
}

impl DomainCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain. A repeated name replaces the earlier definition in place.
    pub fn insert(&mut self, domain: DomainDefinition) {
        match self.index.get(&domain.name) {
            Some(&position) => self.domains[position] = domain,
            None => {
                self.index.insert(domain.name.clone(), self.domains.len());
                self.domains.push(domain);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DomainDefinition> {
        self.index.get(name).map(|&i| &self.domains[i])
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainDefinition> {
        self.domains.iter()
    }
}

impl FromIterator<DomainDefinition> for DomainCatalog {
    fn from_iter<I: IntoIterator<Item = DomainDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for domain in iter {
            catalog.insert(domain);
        }
        catalog
    }
}

/// Outcome of joining a field's inline domain block against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainResolution<'a> {
    /// The field carries no inline domain block
    None,
    /// The referenced domain exists in the workspace collection
    Resolved(&'a DomainDefinition),
    /// An inline block exists but its name is missing or not in the catalog
    Unresolved { name: &'a str },
}

impl<'a> DomainResolution<'a> {
    pub fn domain(&self) -> Option<&'a DomainDefinition> {
        match self {
            Self::Resolved(domain) => Some(domain),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }
}

/// Everything extracted for one feature class: the aggregate every writer reads
#[derive(Debug, Clone)]
pub struct ExtractedSchema {
    /// Name of the targeted feature class
    pub feature_class: String,
    /// Fields in document order, names unique
    pub fields: Vec<FieldDefinition>,
    /// Workspace-level domain catalog
    pub domains: DomainCatalog,
}

impl ExtractedSchema {
    pub fn new(
        feature_class: impl Into<String>,
        fields: Vec<FieldDefinition>,
        domains: DomainCatalog,
    ) -> Self {
        Self {
            feature_class: feature_class.into(),
            fields,
            domains,
        }
    }

    /// Join a field to its workspace domain by name
    pub fn resolve<'a>(&'a self, field: &'a FieldDefinition) -> DomainResolution<'a> {
        match &field.domain {
            None => DomainResolution::None,
            Some(reference) => {
                let name = reference.name.as_deref().unwrap_or("");
                match self.domains.get(name) {
                    Some(domain) => DomainResolution::Resolved(domain),
                    None => DomainResolution::Unresolved { name },
                }
            }
        }
    }

    /// Fields whose domain resolves, paired with the definition, in document order
    pub fn resolved_fields(&self) -> impl Iterator<Item = (&FieldDefinition, &DomainDefinition)> {
        self.fields
            .iter()
            .filter_map(move |field| self.resolve(field).domain().map(|domain| (field, domain)))
    }

    /// Fields that carry an inline domain block whose name does not resolve
    pub fn unresolved_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields
            .iter()
            .filter(move |field| self.resolve(field).is_unresolved())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Slug used to derive default artifact file names (`Building_A` -> `building_a`)
    pub fn file_stem(&self) -> String {
        self.feature_class.to_lowercase()
    }
}
