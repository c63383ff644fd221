//! Schema validation: reconcile a parsed provider document with the catalog.
//!
//! The validator never fails on content. Unknown slides and keys are dropped,
//! misspelled keys are mapped through the alias table, off-shape values are
//! coerced or defaulted, and every declared field ends up present. Only a
//! wrongly typed top level or an empty selection is an error.

use crate::catalog::{Catalog, CatalogEntry, FieldShape};
use crate::coerce::{self, Coercion};
use crate::error::ValidationError;
use crate::types::{GenerationResult, Section};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Title of the section holding slides the provider left unsectioned.
pub const ADDITIONAL_SECTION: &str = "Additional";

/// Title of the section used when no provided section survives.
pub const OVERVIEW_SECTION: &str = "Overview";

/// Everything the validator dropped, renamed, or filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Selected identifiers that are not in the catalog (or not strings).
    pub unknown_slides: Vec<String>,
    /// Sections removed because none of their slides survived.
    pub dropped_sections: Vec<String>,
    /// Slide ids whose nested content was lifted to the top level.
    pub flattened: Vec<String>,
    /// `(alias, canonical)` pairs that were renamed.
    pub aliased: Vec<(String, String)>,
    /// Aliases discarded because the canonical key was also present.
    pub alias_collisions: Vec<String>,
    /// Keys whose value was reshaped to fit the field.
    pub coerced: Vec<String>,
    /// Keys whose value could not be used.
    pub rejected: Vec<String>,
    /// Keys filled from the catalog default.
    pub defaulted: Vec<String>,
    /// Keys removed because no selected slide declares them.
    pub stripped: Vec<String>,
}

impl ValidationReport {
    /// True when the document needed no changes besides default-filling.
    pub fn is_clean(&self) -> bool {
        self.unknown_slides.is_empty()
            && self.dropped_sections.is_empty()
            && self.flattened.is_empty()
            && self.aliased.is_empty()
            && self.alias_collisions.is_empty()
            && self.coerced.is_empty()
            && self.rejected.is_empty()
            && self.stripped.is_empty()
    }
}

/// Validates parsed documents against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Validate a full `{selected_slides, sections, content}` document.
    pub fn validate(&self, document: Value) -> Result<GenerationResult, ValidationError> {
        self.validate_with_report(document).map(|(result, _)| result)
    }

    /// Like [`validate`](Self::validate), also returning what was changed.
    pub fn validate_with_report(
        &self,
        document: Value,
    ) -> Result<(GenerationResult, ValidationReport), ValidationError> {
        let Value::Object(mut root) = document else {
            return Err(malformed("document", "an object"));
        };

        let selected = match root.get("selected_slides") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(malformed("selected_slides", "an array")),
        };
        let sections = match root.get("sections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return Err(malformed("sections", "an array")),
        };
        let content = match root.remove("content") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(malformed("content", "an object")),
        };

        let mut report = ValidationReport::default();
        let selected = self.filter_selection(&selected, &mut report);
        if selected.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let sections = self.filter_sections(&sections, &selected, &mut report);
        let content = self.normalize_keys(content, &mut report);
        let content = self.reconcile_content(content, &selected, &mut report);

        Ok((
            GenerationResult {
                selected_slides: selected,
                sections,
                content,
            },
            report,
        ))
    }

    /// Validate a document that may be bare content.
    ///
    /// A root carrying `selected_slides` is validated as a full document.
    /// Otherwise the root (or its `content` member) is the content mapping,
    /// and the selection is every entry, in catalog order, with at least one
    /// of its fields present.
    pub fn validate_content_document(
        &self,
        document: Value,
    ) -> Result<(GenerationResult, ValidationReport), ValidationError> {
        let Value::Object(mut root) = document else {
            return Err(malformed("document", "an object"));
        };
        if root.contains_key("selected_slides") {
            return self.validate_with_report(Value::Object(root));
        }

        let content = match root.remove("content") {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => root,
            Some(_) => return Err(malformed("content", "an object")),
        };
        let mut report = ValidationReport::default();
        let content = self.normalize_keys(content, &mut report);

        let selected: Vec<String> = self
            .catalog
            .entries()
            .iter()
            .filter(|e| e.fields().iter().any(|f| content.contains_key(f.key())))
            .map(|e| e.id().to_string())
            .collect();
        if selected.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let sections = self.filter_sections(&[], &selected, &mut report);
        let content = self.reconcile_content(content, &selected, &mut report);
        Ok((
            GenerationResult {
                selected_slides: selected,
                sections,
                content,
            },
            report,
        ))
    }

    fn filter_selection(&self, items: &[Value], report: &mut ValidationReport) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for item in items {
            match item.as_str() {
                Some(id) if self.catalog.contains(id) => {
                    if seen.insert(id) {
                        selected.push(id.to_string());
                    } else {
                        log::debug!("Dropping duplicate slide '{id}'");
                    }
                }
                Some(id) => {
                    log::warn!("Dropping unknown slide '{id}'");
                    report.unknown_slides.push(id.to_string());
                }
                None => {
                    log::warn!("Dropping non-string slide entry {item}");
                    report.unknown_slides.push(item.to_string());
                }
            }
        }
        selected
    }

    fn filter_sections(
        &self,
        items: &[Value],
        selected: &[String],
        report: &mut ValidationReport,
    ) -> Vec<Section> {
        let selected_set: HashSet<&str> = selected.iter().map(String::as_str).collect();
        let mut placed: HashSet<String> = HashSet::new();
        let mut sections = Vec::new();

        for (i, item) in items.iter().enumerate() {
            let title = item
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Section {}", i + 1));
            let slides: Vec<String> = item
                .get("slides")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .filter(|id| selected_set.contains(id))
                .filter(|id| placed.insert(id.to_string()))
                .map(str::to_string)
                .collect();

            if slides.is_empty() {
                log::warn!("Dropping section '{title}' with no valid slides");
                report.dropped_sections.push(title);
                continue;
            }
            let subtitle = item
                .get("subtitle")
                .and_then(Value::as_str)
                .unwrap_or_default();
            sections.push(Section::new(title, slides).with_subtitle(subtitle));
        }

        let unplaced: Vec<String> = selected
            .iter()
            .filter(|id| !placed.contains(id.as_str()))
            .cloned()
            .collect();
        if sections.is_empty() {
            sections.push(Section::new(OVERVIEW_SECTION, unplaced));
        } else if !unplaced.is_empty() {
            log::debug!("Placing {} unsectioned slides in '{ADDITIONAL_SECTION}'", unplaced.len());
            sections.push(Section::new(ADDITIONAL_SECTION, unplaced));
        }
        sections
    }

    fn is_entry_id(&self, key: &str) -> bool {
        self.catalog.contains(key) || self.catalog.fixed_entries().iter().any(|e| e.id() == key)
    }

    /// Lift content nested under slide ids and resolve aliases.
    fn normalize_keys(&self, content: Map<String, Value>, report: &mut ValidationReport) -> Map<String, Value> {
        let mut flat = Map::new();
        let mut nested = Vec::new();
        for (key, value) in content {
            match value {
                Value::Object(inner) if self.is_entry_id(&key) && self.catalog.field(&key).is_none() => {
                    report.flattened.push(key);
                    nested.extend(inner);
                }
                value => {
                    flat.insert(key, value);
                }
            }
        }
        for (key, value) in nested {
            flat.entry(key).or_insert(value);
        }

        let mut resolved = Map::new();
        let mut aliased = Vec::new();
        for (key, value) in flat {
            if self.catalog.resolve_alias(&key) == key {
                resolved.insert(key, value);
            } else {
                aliased.push((key, value));
            }
        }
        for (alias, value) in aliased {
            let canonical = self.catalog.resolve_alias(&alias).to_string();
            if resolved.contains_key(&canonical) {
                log::debug!("Discarding alias '{alias}', '{canonical}' already present");
                report.alias_collisions.push(alias);
            } else {
                log::debug!("Renaming '{alias}' to '{canonical}'");
                resolved.insert(canonical.clone(), value);
                report.aliased.push((alias, canonical));
            }
        }
        resolved
    }

    /// Coerce, default-fill and strip an already normalized content mapping.
    fn reconcile_content(
        &self,
        content: Map<String, Value>,
        selected: &[String],
        report: &mut ValidationReport,
    ) -> Map<String, Value> {
        let mut coerced = Map::new();
        for (key, value) in content {
            let Some(field) = self.catalog.field(&key) else {
                coerced.insert(key, value);
                continue;
            };
            match coerce::coerce(field.shape(), &value, field.default()) {
                Coercion::Unchanged => {
                    coerced.insert(key, value);
                }
                Coercion::Coerced(fixed) => {
                    log::debug!("Coerced '{key}' to its declared shape");
                    report.coerced.push(key.clone());
                    coerced.insert(key, fixed);
                }
                Coercion::Rejected => {
                    log::debug!("Rejected value of '{key}', using default");
                    report.rejected.push(key);
                }
            }
        }

        let entries: Vec<&CatalogEntry> = self
            .catalog
            .fixed_entries()
            .iter()
            .chain(selected.iter().filter_map(|id| self.catalog.get(id)))
            .collect();

        let mut output = Map::new();
        for entry in &entries {
            for field in entry.fields() {
                if output.contains_key(field.key()) {
                    continue;
                }
                let value = match coerced.get(field.key()) {
                    Some(value) => value.clone(),
                    None => {
                        log::debug!("Defaulting missing '{}'", field.key());
                        report.defaulted.push(field.key().to_string());
                        field.default().clone()
                    }
                };
                output.insert(field.key().to_string(), value);
            }
        }

        for entry in &entries {
            for field in entry.fields() {
                match field.shape() {
                    FieldShape::Series { categories, .. } => {
                        let count = output
                            .get(categories)
                            .and_then(Value::as_array)
                            .map_or(0, Vec::len);
                        if let Some(series) = output.get_mut(field.key()) {
                            if coerce::fit_series(series, count) {
                                mark_coerced(report, field.key());
                            }
                        }
                    }
                    FieldShape::Percentages { labels, legend, .. } => {
                        fit_percentage_labels(&mut output, field.key(), labels.as_deref(), legend.as_deref(), report);
                    }
                    _ => {}
                }
            }
        }

        for key in coerced.keys().filter(|k| !output.contains_key(k.as_str())) {
            log::debug!("Stripping undeclared key '{key}'");
            report.stripped.push(key.clone());
        }
        output
    }
}

/// Match the label list to the value count and rebuild the legend from both.
fn fit_percentage_labels(
    output: &mut Map<String, Value>,
    values_key: &str,
    labels_key: Option<&str>,
    legend_key: Option<&str>,
    report: &mut ValidationReport,
) {
    let Some(values) = output.get(values_key).cloned() else {
        return;
    };
    let count = values.as_array().map_or(0, Vec::len);

    let Some(labels_key) = labels_key.filter(|k| output.contains_key(*k)) else {
        return;
    };
    let labels = coerce::fit_labels(&output[labels_key], count);
    if output[labels_key] != labels {
        log::debug!("Fitting '{labels_key}' to {count} values");
        mark_coerced(report, labels_key);
        output.insert(labels_key.to_string(), labels.clone());
    }

    if let Some(legend_key) = legend_key.filter(|k| output.contains_key(*k)) {
        let legend = coerce::legend(&labels, &values);
        if output[legend_key] != legend {
            mark_coerced(report, legend_key);
            output.insert(legend_key.to_string(), legend);
        }
    }
}

fn mark_coerced(report: &mut ValidationReport, key: &str) {
    if !report.coerced.iter().any(|k| k == key) {
        report.coerced.push(key.to_string());
    }
}

fn malformed(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::MalformedTopLevel {
        field: field.to_string(),
        expected,
    }
}
