//! CSV layouts: row-per-value, columnar pick lists and field overview
//!
//! Only fields whose domain resolves in the workspace catalog contribute rows
//! to the domain-centric layouts. Fields without an inline domain block, or
//! with a dangling one, are left out; the field overview and the metadata
//! export still list them.

use crate::domain::errors::{ExportError, ExportResult};
use crate::domain::schema::{DomainDefinition, DomainKind, ExtractedSchema, FieldDefinition};

pub const DOMAIN_VALUES_HEADER: [&str; 8] = [
    "Field Name",
    "Field Alias",
    "Domain Type",
    "Domain Name",
    "Option Name",
    "Option Code",
    "Min Value",
    "Max Value",
];

pub const DOMAIN_DETAILS_HEADER: [&str; 9] = [
    "Field Name",
    "Field Alias",
    "Domain Name",
    "Domain Description",
    "Domain Type",
    "Option Name",
    "Option Code",
    "Min Value",
    "Max Value",
];

pub const FIELD_SUMMARY_HEADER: [&str; 8] = [
    "Field Name",
    "Field Alias",
    "Field Type",
    "Has Domain",
    "Domain Name",
    "Domain Type",
    "Domain Description",
    "Sample Values",
];

/// Coded values listed in the field overview before the remainder is summarized
const SAMPLE_VALUES: usize = 3;

/// Encode a header and rows with CRLF terminators and minimal quoting
pub fn render<H, R, I>(header: &[H], rows: I) -> ExportResult<String>
where
    H: AsRef<[u8]>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::serialization(format!("CSV output is not UTF-8: {e}")))
}

/// One row per coded value, or one row per range domain
pub fn domain_values_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let rows = schema.resolved_fields().flat_map(|(field, domain)| {
        value_rows(domain).into_iter().map(move |cells| {
            let [option_name, option_code, min, max] = cells;
            vec![
                field.name.clone(),
                field.display_alias().to_string(),
                domain.kind.label().to_string(),
                domain.name.clone(),
                option_name,
                option_code,
                min,
                max,
            ]
        })
    });

    render(&DOMAIN_VALUES_HEADER, rows)
}

/// Same rows as [`domain_values_csv`] with the domain description added
pub fn domain_details_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let rows = schema.resolved_fields().flat_map(|(field, domain)| {
        value_rows(domain).into_iter().map(move |cells| {
            let [option_name, option_code, min, max] = cells;
            vec![
                field.name.clone(),
                field.display_alias().to_string(),
                domain.name.clone(),
                domain.description.clone().unwrap_or_default(),
                domain.kind.label().to_string(),
                option_name,
                option_code,
                min,
                max,
            ]
        })
    });

    render(&DOMAIN_DETAILS_HEADER, rows)
}

/// `[option name, option code, min, max]` for every row a domain contributes
fn value_rows(domain: &DomainDefinition) -> Vec<[String; 4]> {
    match &domain.kind {
        DomainKind::CodedValue(values) => values
            .iter()
            .map(|v| [v.name.clone(), v.code.clone(), String::new(), String::new()])
            .collect(),
        DomainKind::Range(bounds) => vec![[
            String::new(),
            String::new(),
            bounds.min_text().to_string(),
            bounds.max_text().to_string(),
        ]],
    }
}

/// Column per resolved-domain field with `name (code)` cells
pub fn columnar_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let columns = columns(schema, |field, domain| {
        let header = format!("{} ({})", field.display_alias(), field.name);
        let cells = match &domain.kind {
            DomainKind::CodedValue(values) => values.iter().map(|v| v.display()).collect(),
            DomainKind::Range(bounds) => vec![format!("Range: {}", bounds.describe())],
        };
        (header, cells)
    });

    render_columns(columns)
}

/// Column per resolved-domain field with bare codes
pub fn columnar_codes_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let columns = columns(schema, |field, domain| {
        let cells = match &domain.kind {
            DomainKind::CodedValue(values) => values.iter().map(|v| v.code.clone()).collect(),
            DomainKind::Range(bounds) => vec![bounds.describe()],
        };
        (field.name.clone(), cells)
    });

    render_columns(columns)
}

/// Resolved fields ordered by raw field name, each mapped to a column
fn columns<F>(schema: &ExtractedSchema, to_column: F) -> Vec<(String, Vec<String>)>
where
    F: Fn(&FieldDefinition, &DomainDefinition) -> (String, Vec<String>),
{
    let mut resolved: Vec<_> = schema.resolved_fields().collect();
    resolved.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
    resolved
        .into_iter()
        .map(|(field, domain)| to_column(field, domain))
        .collect()
}

/// Transpose columns into rows, padding short columns with empty cells.
/// No columns at all renders as an empty document.
fn render_columns(columns: Vec<(String, Vec<String>)>) -> ExportResult<String> {
    if columns.is_empty() {
        return Ok(String::new());
    }

    let height = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
    let header: Vec<&str> = columns.iter().map(|(h, _)| h.as_str()).collect();

    let rows = (0..height).map(|row| {
        columns
            .iter()
            .map(|(_, cells)| cells.get(row).map(String::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
    });

    render(header.as_slice(), rows)
}

/// One overview row per field, domain or not
pub fn field_summary_csv(schema: &ExtractedSchema) -> ExportResult<String> {
    let rows = schema.fields.iter().map(|field| {
        let domain = schema.resolve(field).domain();
        vec![
            field.name.clone(),
            field.display_alias().to_string(),
            field.field_type.as_str().to_string(),
            if field.has_domain() { "Yes" } else { "No" }.to_string(),
            field.domain_name().unwrap_or_default().to_string(),
            domain.map(|d| d.kind.label()).unwrap_or_default().to_string(),
            domain
                .and_then(|d| d.description.clone())
                .unwrap_or_default(),
            domain.map(sample_values).unwrap_or_default(),
        ]
    });

    render(&FIELD_SUMMARY_HEADER, rows)
}

/// `name (code); ...; ... +N more` or `Range: min to max`
pub fn sample_values(domain: &DomainDefinition) -> String {
    match &domain.kind {
        DomainKind::CodedValue(values) => {
            let mut samples: Vec<String> =
                values.iter().take(SAMPLE_VALUES).map(|v| v.display()).collect();
            if values.len() > SAMPLE_VALUES {
                samples.push(format!("... +{} more", values.len() - SAMPLE_VALUES));
            }
            samples.join("; ")
        }
        DomainKind::Range(bounds) => format!("Range: {}", bounds.describe()),
    }
}
