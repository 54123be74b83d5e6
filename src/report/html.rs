//! HTML attribute reference manual
//!
//! One page per feature class: stat cards, a two-part table of contents and one
//! `field-section` per field whose `id` is the raw field name.

use super::{ArtifactKind, ReportOptions};
use crate::domain::schema::{
    CodedValue, DomainDefinition, DomainKind, DomainResolution, ExtractedSchema, FieldDefinition,
};

const STYLE: &str = r#"        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
        h2 {
            color: #34495e;
            margin-top: 40px;
            padding: 10px;
            background-color: #ecf0f1;
            border-left: 4px solid #3498db;
        }
        .field-info { background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin: 30px 0 20px; }
        .field-name { font-weight: bold; color: #2c3e50; font-size: 1.2em; }
        .field-alias { color: #7f8c8d; font-style: italic; margin-left: 10px; }
        .field-type {
            background-color: #e74c3c;
            color: white;
            padding: 2px 8px;
            border-radius: 3px;
            font-size: 0.8em;
            margin-left: 10px;
        }
        .domain-description {
            margin: 10px 0;
            padding: 10px;
            background-color: #e8f5e8;
            border-left: 3px solid #27ae60;
            font-style: italic;
        }
        table { width: 100%; border-collapse: collapse; margin: 15px 0; background-color: white; }
        th { background-color: #3498db; color: white; padding: 12px; text-align: left; border: 1px solid #ddd; }
        td { padding: 10px; border: 1px solid #ddd; vertical-align: top; }
        tr:nth-child(even) { background-color: #f9f9f9; }
        tr:hover { background-color: #f1f8ff; }
        .code {
            font-family: 'Courier New', monospace;
            background-color: #f4f4f4;
            padding: 2px 4px;
            border-radius: 3px;
            font-size: 0.9em;
        }
        .range-info, .large-domain-note {
            background-color: #fff3cd;
            border: 1px solid #ffeaa7;
            border-radius: 5px;
            padding: 15px;
            margin: 10px 0;
        }
        .no-domain {
            color: #7f8c8d;
            font-style: italic;
            margin: 10px 0;
            padding: 10px;
            background-color: #f8f9fa;
            border-left: 3px solid #bdc3c7;
        }
        .toc { background-color: #f8f9fa; padding: 20px; border-radius: 5px; margin-bottom: 30px; }
        .toc h3 { margin-top: 0; color: #2c3e50; }
        .toc-section { margin-bottom: 20px; }
        .toc-section h4 { color: #34495e; margin-bottom: 10px; border-bottom: 1px solid #bdc3c7; padding-bottom: 5px; }
        .toc-list { columns: 2; column-gap: 30px; }
        .toc-list li { margin-bottom: 5px; break-inside: avoid; }
        .toc-list a { text-decoration: none; color: #3498db; }
        .toc-list a:hover { text-decoration: underline; }
        .summary-stats {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .stat-card { background-color: #3498db; color: white; padding: 15px; border-radius: 5px; text-align: center; }
        .stat-number { font-size: 2em; font-weight: bold; }
        .stat-label { font-size: 0.9em; }
        .field-section { border-bottom: 1px solid #ecf0f1; padding-bottom: 20px; margin-bottom: 20px; }
        footer { margin-top: 50px; padding-top: 20px; border-top: 1px solid #ddd; color: #7f8c8d; text-align: center; }
"#;

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the complete manual
pub fn render_manual(schema: &ExtractedSchema, options: &ReportOptions) -> String {
    let (with_domain, simple): (Vec<&FieldDefinition>, Vec<&FieldDefinition>) =
        schema.fields.iter().partition(|f| f.has_domain());
    let title = escape_html(&options.manual.title_for(&schema.feature_class));

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("    <title>{title}</title>\n"));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
    html.push_str(&format!("        <h1>{title}</h1>\n"));

    html.push_str("        <div class=\"summary-stats\">\n");
    for (count, label) in [
        (schema.fields.len(), "Total Fields"),
        (with_domain.len(), "Fields with Domains"),
        (simple.len(), "Simple Fields"),
    ] {
        html.push_str(&format!(
            "            <div class=\"stat-card\"><div class=\"stat-number\">{count}</div><div class=\"stat-label\">{label}</div></div>\n"
        ));
    }
    html.push_str("        </div>\n");

    html.push_str("        <div class=\"toc\">\n            <h3>Table of Contents</h3>\n");
    toc_section(&mut html, "Fields with Domain Constraints", &with_domain);
    toc_section(&mut html, "Simple Fields", &simple);
    html.push_str("        </div>\n");

    html.push_str("        <h2>Fields with Domain Constraints</h2>\n");
    html.push_str("        <p>The following fields have predefined domain values that constrain the allowable inputs.</p>\n");
    for field in &with_domain {
        field_section(&mut html, schema, field, options);
    }

    html.push_str("        <h2>Simple Fields (No Domain Constraints)</h2>\n");
    html.push_str(
        "        <p>The following fields do not have domain constraints and accept free-form input.</p>\n",
    );
    for field in &simple {
        field_section(&mut html, schema, field, options);
    }

    html.push_str("        <h2>File References</h2>\n        <ul>\n");
    for (label, kind, description) in [
        ("Complete Metadata", ArtifactKind::MetadataCsv, "All 32 metadata properties for each field"),
        ("Detailed Domains", ArtifactKind::DomainDetailsCsv, "All domain values with descriptions"),
        ("Columnar Format", ArtifactKind::ColumnarCsv, "Pick lists in column format"),
        ("All Fields Summary", ArtifactKind::FieldSummaryCsv, "Overview of all fields"),
    ] {
        html.push_str(&format!(
            "            <li><strong>{label}:</strong> <code>{}</code> - {description}</li>\n",
            escape_html(options.file_name(kind))
        ));
    }
    html.push_str("        </ul>\n");

    html.push_str("        <footer>\n");
    html.push_str(&format!(
        "            <p>Generated from geodatabase XML schema - {} Feature Class Complete Reference</p>\n",
        escape_html(&schema.feature_class)
    ));
    html.push_str(&format!(
        "            <p>Total: {} fields ({} with domains, {} without domains)</p>\n",
        schema.fields.len(),
        with_domain.len(),
        simple.len()
    ));
    html.push_str("        </footer>\n    </div>\n</body>\n</html>\n");

    html
}

fn toc_section(html: &mut String, heading: &str, fields: &[&FieldDefinition]) {
    html.push_str("            <div class=\"toc-section\">\n");
    html.push_str(&format!(
        "                <h4>{heading} ({} fields)</h4>\n",
        fields.len()
    ));
    html.push_str("                <ul class=\"toc-list\">\n");
    for field in fields {
        html.push_str(&format!(
            "                    <li><a href=\"#{}\">{} ({})</a></li>\n",
            escape_html(&field.name),
            escape_html(field.display_alias()),
            escape_html(&field.name)
        ));
    }
    html.push_str("                </ul>\n            </div>\n");
}

fn field_section(
    html: &mut String,
    schema: &ExtractedSchema,
    field: &FieldDefinition,
    options: &ReportOptions,
) {
    html.push_str(&format!(
        "        <div class=\"field-section\" id=\"{}\">\n",
        escape_html(&field.name)
    ));
    html.push_str(&format!(
        "            <div class=\"field-info\"><div class=\"field-name\">{}<span class=\"field-alias\">({})</span><span class=\"field-type\">{}</span></div></div>\n",
        escape_html(&field.name),
        escape_html(field.display_alias()),
        escape_html(field.field_type.short_name())
    ));

    match schema.resolve(field) {
        DomainResolution::Resolved(domain) => domain_body(html, domain, options),
        DomainResolution::Unresolved { name } => {
            html.push_str(&format!(
                "            <div class=\"no-domain\">Domain <span class=\"code\">{}</span> is referenced by this field, but its definition was not found in the workspace.</div>\n",
                escape_html(name)
            ));
        }
        DomainResolution::None => {
            html.push_str("            <div class=\"no-domain\">This field accepts free-form input with no predefined constraints.</div>\n");
        }
    }

    html.push_str("        </div>\n");
}

fn domain_body(html: &mut String, domain: &DomainDefinition, options: &ReportOptions) {
    let description = domain
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("No description available.");
    html.push_str(&format!(
        "            <div class=\"domain-description\">{}</div>\n",
        escape_html(description)
    ));

    match &domain.kind {
        DomainKind::Range(bounds) => {
            html.push_str(&format!(
                "            <div class=\"range-info\"><strong>Range Domain:</strong> Minimum value: <span class=\"code\">{}</span>, Maximum value: <span class=\"code\">{}</span></div>\n",
                escape_html(bounds.min_text()),
                escape_html(bounds.max_text())
            ));
        }
        DomainKind::CodedValue(values) => coded_table(html, values, options),
    }
}

fn coded_table(html: &mut String, values: &[CodedValue], options: &ReportOptions) {
    let truncated = values.len() > options.manual.large_domain_threshold;
    let shown = if truncated {
        &values[..options.manual.preview_rows.min(values.len())]
    } else {
        values
    };

    if truncated {
        html.push_str(&format!(
            "            <div class=\"large-domain-note\"><strong>Large Domain:</strong> This field has {} possible values. Showing first {}. Complete list available in CSV files.</div>\n",
            values.len(),
            shown.len()
        ));
    }

    html.push_str("            <table>\n");
    html.push_str("                <thead><tr><th>Display Name</th><th>Code Value</th></tr></thead>\n");
    html.push_str("                <tbody>\n");
    for value in shown {
        html.push_str(&format!(
            "                    <tr><td>{}</td><td class=\"code\">{}</td></tr>\n",
            escape_html(&value.name),
            escape_html(&value.code)
        ));
    }
    if truncated {
        html.push_str(&format!(
            "                    <tr><td colspan=\"2\"><em>... and {} more values</em></td></tr>\n",
            values.len() - shown.len()
        ));
    }
    html.push_str("                </tbody>\n            </table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{DomainCatalog, FieldType};
    use crate::extract::extract_schema;
    use crate::fixtures;
    use crate::xml::XmlDocument;

    fn workspace() -> ExtractedSchema {
        let doc = XmlDocument::parse(fixtures::WORKSPACE_XML).unwrap();
        extract_schema(&doc, "Building_A").unwrap()
    }

    fn large_schema(count: usize) -> ExtractedSchema {
        let domain = DomainDefinition {
            name: "big".to_string(),
            xsi_type: "esri:CodedValueDomain".to_string(),
            description: None,
            owner: None,
            field_type: None,
            merge_policy: None,
            split_policy: None,
            kind: DomainKind::CodedValue(
                (0..count)
                    .map(|i| CodedValue::new(format!("Value {i}"), format!("C{i}")))
                    .collect(),
            ),
        };
        ExtractedSchema::new(
            "Test",
            vec![FieldDefinition::new("country", FieldType::String).with_domain("big")],
            std::iter::once(domain).collect::<DomainCatalog>(),
        )
    }

    #[test]
    fn test_every_field_has_exactly_one_anchor() {
        let schema = workspace();
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        for field in &schema.fields {
            let anchor = format!("id=\"{}\"", field.name);
            assert_eq!(html.matches(&anchor).count(), 1, "anchor for {}", field.name);
            assert!(html.contains(&format!("href=\"#{}\"", field.name)));
        }
    }

    #[test]
    fn test_toc_groups_and_stat_cards() {
        let schema = workspace();
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        assert!(html.contains("<h4>Fields with Domain Constraints (4 fields)</h4>"));
        assert!(html.contains("<h4>Simple Fields (3 fields)</h4>"));
        assert!(html.contains("<div class=\"stat-number\">7</div><div class=\"stat-label\">Total Fields</div>"));
        assert!(html.contains("<title>Building_A Feature Class - Complete Attribute Reference Manual</title>"));
        assert!(html.contains("<code>building_a_complete_metadata.csv</code>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let schema = workspace();
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        assert!(html.contains("<td>Fair, needs &lt;review&gt;</td>"));
        assert!(html.contains("Building condition &amp; upkeep"));
        assert!(!html.contains("<review>"));
    }

    #[test]
    fn test_dangling_reference_is_noted() {
        let schema = workspace();
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        let start = html.find("id=\"ghost\"").unwrap();
        let section = &html[start..];
        let section = &section[..section.find("</div>\n        </div>").unwrap()];
        assert!(section.contains("GhostDomain"));
        assert!(section.contains("definition was not found"));
    }

    #[test]
    fn test_range_domain_rendering() {
        let schema = workspace();
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));
        assert!(html.contains("Minimum value: <span class=\"code\">0</span>, Maximum value: <span class=\"code\">10000</span>"));
    }

    #[test]
    fn test_large_domain_is_truncated() {
        let schema = large_schema(60);
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        assert!(html.contains("This field has 60 possible values. Showing first 20."));
        assert!(html.contains("<td>Value 19</td>"));
        assert!(!html.contains("<td>Value 20</td>"));
        assert!(html.contains("... and 40 more values"));
    }

    #[test]
    fn test_threshold_boundary_shows_everything() {
        let schema = large_schema(50);
        let html = render_manual(&schema, &ReportOptions::for_schema(&schema));

        assert!(!html.contains("large-domain-note\">"));
        assert!(html.contains("<td>Value 49</td>"));
    }

    #[test]
    fn test_custom_truncation_settings() {
        let schema = large_schema(12);
        let mut options = ReportOptions::for_schema(&schema);
        options.manual.large_domain_threshold = 10;
        options.manual.preview_rows = 5;

        let html = render_manual(&schema, &options);
        assert!(html.contains("<td>Value 4</td>"));
        assert!(!html.contains("<td>Value 5</td>"));
        assert!(html.contains("... and 7 more values"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
