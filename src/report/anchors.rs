//! Navigation checks for a generated HTML manual
//!
//! Anchors and links are compared in their escaped form, exactly as written
//! to the page.

use super::html::escape_html;
use crate::domain::errors::{ExportError, ExportResult};
use crate::domain::schema::ExtractedSchema;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const ID_PATTERN: &str = r#"\sid="([^"]*)""#;
const LINK_PATTERN: &str = r##"href="#([^"]*)""##;
const SECTION_PATTERN: &str = r#"<div class="field-section"(\s+id="[^"]*")?"#;

/// Outcome of checking one manual
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManualCheck {
    pub field_sections: usize,
    pub sections_without_id: usize,
    pub internal_links: usize,
    /// Ids that appear more than once
    pub duplicate_ids: Vec<String>,
    /// Link targets with no matching id
    pub broken_links: Vec<String>,
    /// Schema fields with no anchor on the page
    pub missing_anchors: Vec<String>,
    pub has_title: bool,
    pub has_style: bool,
}

impl ManualCheck {
    pub fn is_valid(&self) -> bool {
        self.problems().is_empty()
    }

    /// Human-readable description of every problem found
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.internal_links == 0 {
            problems.push("table of contents has no internal links".to_string());
        }
        if self.sections_without_id > 0 {
            problems.push(format!(
                "{} of {} field sections have no id",
                self.sections_without_id, self.field_sections
            ));
        }
        for id in &self.duplicate_ids {
            problems.push(format!("duplicate id '{id}'"));
        }
        for target in &self.broken_links {
            problems.push(format!("broken link '#{target}'"));
        }
        for field in &self.missing_anchors {
            problems.push(format!("no anchor for field '{field}'"));
        }
        if !self.has_title {
            problems.push("missing <title>".to_string());
        }
        if !self.has_style {
            problems.push("missing <style>".to_string());
        }

        problems
    }
}

fn compile(pattern: &str) -> ExportResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| ExportError::validation(format!("Invalid anchor pattern '{pattern}': {e}")))
}

/// Check anchors and links of `html`; with a schema, also require one anchor per field
pub fn check_manual(html: &str, schema: Option<&ExtractedSchema>) -> ExportResult<ManualCheck> {
    let id_pattern = compile(ID_PATTERN)?;
    let link_pattern = compile(LINK_PATTERN)?;
    let section_pattern = compile(SECTION_PATTERN)?;

    let mut id_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for capture in id_pattern.captures_iter(html) {
        if let Some(id) = capture.get(1) {
            *id_counts.entry(id.as_str()).or_insert(0) += 1;
        }
    }

    let mut check = ManualCheck {
        has_title: html.contains("<title>"),
        has_style: html.contains("<style>"),
        ..Default::default()
    };

    for capture in section_pattern.captures_iter(html) {
        check.field_sections += 1;
        if capture.get(1).is_none() {
            check.sections_without_id += 1;
        }
    }

    check.duplicate_ids = id_counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(id, _)| id.to_string())
        .collect();

    let mut broken = BTreeSet::new();
    for capture in link_pattern.captures_iter(html) {
        if let Some(target) = capture.get(1) {
            check.internal_links += 1;
            if !id_counts.contains_key(target.as_str()) {
                broken.insert(target.as_str().to_string());
            }
        }
    }
    check.broken_links = broken.into_iter().collect();

    if let Some(schema) = schema {
        check.missing_anchors = schema
            .fields
            .iter()
            .filter(|field| !id_counts.contains_key(escape_html(&field.name).as_str()))
            .map(|field| field.name.clone())
            .collect();
    }

    tracing::debug!(
        "Checked manual: {} sections, {} links, {} problems",
        check.field_sections,
        check.internal_links,
        check.problems().len()
    );

    Ok(check)
}
