//! The slide catalog: every selectable content unit and the fields it expects.
//!
//! A [`Catalog`] is built once and then only read. It is passed by reference
//! to the prompt builder and the validator; nothing in this crate keeps a
//! global copy.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Inclusive bounds on the number of items a list-shaped field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Len {
    pub min: usize,
    pub max: usize,
}

impl Len {
    /// Exactly `n` items.
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` items.
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn describe(&self) -> String {
        if self.min == self.max {
            self.min.to_string()
        } else {
            format!("{}-{}", self.min, self.max)
        }
    }
}

/// What one table column holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Free text (or a number), optionally capped in length.
    Text { max_chars: Option<usize> },

    /// A 0.0-1.0 progress value.
    Fraction,

    /// One of a fixed set of lowercase words. Anything else becomes `fallback`.
    Choice {
        allowed: Vec<String>,
        fallback: String,
    },
}

impl Column {
    /// Text capped at `max_chars`.
    pub fn text(max_chars: usize) -> Self {
        Column::Text {
            max_chars: Some(max_chars),
        }
    }

    /// Text of any length.
    pub fn unbounded() -> Self {
        Column::Text { max_chars: None }
    }

    pub fn choice(allowed: &[&str], fallback: &str) -> Self {
        Column::Choice {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
            fallback: fallback.to_string(),
        }
    }
}

/// The JSON shape a field value must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape {
    /// A single string, optionally capped in length.
    Text { max_chars: Option<usize> },

    /// A list of scalars (strings or numbers).
    List { len: Len, max_chars: Option<usize> },

    /// A list of fixed-width rows, one [`Column`] per cell.
    ///
    /// With `split_text`, a single `"a | b"` string is read as one row per
    /// `|`-separated part.
    Table {
        len: Len,
        columns: Vec<Column>,
        split_text: bool,
    },

    /// Integers that must add up to 100. `labels` names the list field
    /// holding one label per value; `legend` names a list field rebuilt as
    /// `"label (value%)"`.
    Percentages {
        len: Len,
        labels: Option<String>,
        legend: Option<String>,
    },

    /// Chart series (`{"name", "values"}`), one value per category in the
    /// field named by `categories`.
    Series { categories: String, len: Len },

    /// An object holding one list per named quadrant.
    Quadrants {
        names: Vec<String>,
        len: Len,
        max_chars: Option<usize>,
    },

    /// A list of `{title_key: text, items_key: [text, ...]}` objects.
    Columns {
        title_key: String,
        items_key: String,
        len: Len,
        items: Len,
    },
}

impl FieldShape {
    /// Short human-readable description, used in the system prompt.
    pub fn describe(&self) -> String {
        match self {
            FieldShape::Text { max_chars: Some(max) } => format!("text, max {max} chars"),
            FieldShape::Text { max_chars: None } => "text".to_string(),
            FieldShape::List { len, .. } => format!("list of {}", len.describe()),
            FieldShape::Table { len, columns, .. } => {
                format!("{} rows of {} columns", len.describe(), columns.len())
            }
            FieldShape::Percentages { len, labels: Some(labels), .. } => {
                format!("{} integers summing to 100, one per {}", len.describe(), labels)
            }
            FieldShape::Percentages { len, .. } => {
                format!("{} integers summing to 100", len.describe())
            }
            FieldShape::Series { categories, len } => {
                format!("{} series, one value per {}", len.describe(), categories)
            }
            FieldShape::Quadrants { names, len, .. } => {
                format!("object with {}, {} items each", names.join("/"), len.describe())
            }
            FieldShape::Columns {
                title_key,
                items_key,
                len,
                items,
            } => format!(
                "{} objects with {} and {} {}",
                len.describe(),
                title_key,
                items.describe(),
                items_key
            ),
        }
    }
}

/// One named field a slide expects in the content mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    key: String,
    description: String,
    shape: FieldShape,
    default: Value,
}

impl FieldSpec {
    /// Create a field spec. `default` fills the field when the provider
    /// omits it or returns something that does not fit `shape`.
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        shape: FieldShape,
        default: Value,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            shape,
            default,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn default(&self) -> &Value {
        &self.default
    }
}

/// A selectable content unit: identifier, description and field schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    id: String,
    description: String,
    group: String,
    fields: Vec<FieldSpec>,
}

impl CatalogEntry {
    /// Create an entry with no fields in the "General" group.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            group: "General".to_string(),
            fields: Vec::new(),
        }
    }

    /// Set the group used to section the template deck.
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a declared field by key.
    pub fn get_field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Read-only registry of catalog entries plus the field alias table.
///
/// Selectable entries can be picked by the provider. Fixed entries (cover,
/// closing slide) are part of every deck: their fields are always allowed
/// and always default-filled, but they cannot be selected.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    fixed: Vec<CatalogEntry>,
    aliases: BTreeMap<String, String>,
    index: HashMap<String, usize>,
    fields: HashMap<String, FieldSpec>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The built-in business slide catalog.
    pub fn builtin() -> Self {
        crate::builtin::catalog()
    }

    /// Selectable entries, in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries included in every deck.
    pub fn fixed_entries(&self) -> &[CatalogEntry] {
        &self.fixed
    }

    /// Look up a selectable entry by identifier.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Whether `id` names a selectable entry.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a field declared by any entry, selectable or fixed.
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.get(key)
    }

    /// Map a field key to its canonical spelling. Keys without an alias map
    /// to themselves.
    pub fn resolve_alias<'k>(&'k self, key: &'k str) -> &'k str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    /// The alias table: alternate spelling to canonical key.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// Number of selectable entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    fixed: Vec<CatalogEntry>,
    aliases: BTreeMap<String, String>,
}

impl CatalogBuilder {
    /// Add a selectable entry. An entry with an identifier already present
    /// replaces the earlier one in place.
    pub fn entry(mut self, entry: CatalogEntry) -> Self {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => {
                log::warn!("Catalog entry '{}' defined twice, keeping the later one", entry.id);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
        self
    }

    /// Add an entry that is part of every deck.
    pub fn fixed(mut self, entry: CatalogEntry) -> Self {
        self.fixed.push(entry);
        self
    }

    /// Register `alias` as an alternate spelling of field `canonical`.
    pub fn alias(mut self, alias: impl Into<String>, canonical: impl Into<String>) -> Self {
        let alias = alias.into();
        let canonical = canonical.into();
        if alias != canonical {
            self.aliases.insert(alias, canonical);
        }
        self
    }

    /// Finish the catalog.
    pub fn build(self) -> Catalog {
        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();

        let mut fields = HashMap::new();
        for entry in self.fixed.iter().chain(self.entries.iter()) {
            for field in &entry.fields {
                fields
                    .entry(field.key.clone())
                    .or_insert_with(|| field.clone());
            }
        }

        Catalog {
            entries: self.entries,
            fixed: self.fixed,
            aliases: self.aliases,
            index,
            fields,
        }
    }
}
