//! Shape coercion for content values.
//!
//! Providers get lengths and nesting wrong far more often than they get
//! them entirely wrong. Each [`FieldShape`] has a coercion that repairs the
//! common near-misses (wrong item count, objects where rows were expected,
//! pie values that do not add up) and rejects the rest, so the caller can
//! fall back to the field default.

use crate::catalog::{Column, FieldShape, Len};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

/// Regex matching a leading bullet or list number ("- ", "• ", "2) ").
static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").unwrap());

/// Regex matching the end of a sentence.
static SENTENCE_END_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Progress value used when a fraction cell is not a number.
const FALLBACK_FRACTION: f64 = 0.5;

/// Label of a table row built from a single unlabeled string.
const CONTACT_LABEL: &str = "Contact";

/// Label padding a short list of percentage labels.
const OTHER_LABEL: &str = "Other";

/// Title of a column object that has none.
const COLUMN_TITLE: &str = "Column";

/// Outcome of coercing one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// The value already fits its shape.
    Unchanged,
    /// The value was repaired into this one.
    Coerced(Value),
    /// The value cannot be made to fit; use the default.
    Rejected,
}

/// Coerce `value` to `shape`. `default` supplies padding items for lists
/// and tables that come back too short.
pub fn coerce(shape: &FieldShape, value: &Value, default: &Value) -> Coercion {
    let coerced = match shape {
        FieldShape::Text { max_chars } => coerce_text(value, *max_chars),
        FieldShape::List { len, max_chars } => coerce_list(value, *len, *max_chars, default),
        FieldShape::Table {
            len,
            columns,
            split_text,
        } => coerce_table(value, *len, columns, *split_text, default),
        FieldShape::Percentages { len, .. } => coerce_percentages(value, *len),
        FieldShape::Series { len, .. } => coerce_series(value, *len),
        FieldShape::Quadrants {
            names,
            len,
            max_chars,
        } => coerce_quadrants(value, names, *len, *max_chars, default),
        FieldShape::Columns {
            title_key,
            items_key,
            len,
            items,
        } => coerce_columns(value, (title_key.as_str(), items_key.as_str()), *len, *items, default),
    };

    match coerced {
        Some(v) if &v == value => Coercion::Unchanged,
        Some(v) => Coercion::Coerced(v),
        None => Coercion::Rejected,
    }
}

/// Pad or truncate every series' `values` to `categories` entries.
///
/// Returns true when anything changed.
pub fn fit_series(value: &mut Value, categories: usize) -> bool {
    let Some(series) = value.as_array_mut() else {
        return false;
    };
    let mut changed = false;
    for item in series {
        if let Some(values) = item.get_mut("values").and_then(Value::as_array_mut) {
            if values.len() != categories {
                values.resize(categories, json!(0));
                changed = true;
            }
        }
    }
    changed
}

/// Trim or pad `labels` to `count` entries. Missing labels read "Other".
pub fn fit_labels(labels: &Value, count: usize) -> Value {
    let mut items = labels.as_array().cloned().unwrap_or_default();
    items.truncate(count);
    items.resize(count, Value::from(OTHER_LABEL));
    Value::Array(items)
}

/// One `"label (value%)"` legend entry per label/value pair.
pub fn legend(labels: &Value, values: &Value) -> Value {
    let (Some(labels), Some(values)) = (labels.as_array(), values.as_array()) else {
        return Value::Array(Vec::new());
    };
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| {
            let label = scalar_text(label).unwrap_or_default();
            let value = scalar_text(value).unwrap_or_default();
            Value::String(format!("{label} ({value}%)"))
        })
        .collect()
}

/// Shorten `text` to at most `max` characters, marking the cut with "…".
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let percent = s.ends_with('%');
            let n: f64 = s.trim_end_matches('%').trim().parse().ok()?;
            Some(if percent { n / 100.0 } else { n })
        }
        _ => None,
    }
}

fn coerce_text(value: &Value, max_chars: Option<usize>) -> Option<Value> {
    let text = match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            if parts.is_empty() {
                return None;
            }
            parts.join(" ")
        }
        other => scalar_text(other)?,
    };
    Some(Value::String(match max_chars {
        Some(max) => truncate_chars(&text, max),
        None => text,
    }))
}

/// Split free text into list items: one per line, or one per sentence when
/// the text is a single line.
fn split_items(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let pieces: Vec<String> = if lines.len() > 1 {
        lines.into_iter().map(str::to_string).collect()
    } else {
        let text = text.trim();
        let mut sentences = Vec::new();
        let mut last = 0;
        for m in SENTENCE_END_REGEX.find_iter(text) {
            let end = m.start() + m.as_str().trim_end().len();
            sentences.push(text[last..end].to_string());
            last = m.end();
        }
        sentences.push(text[last..].to_string());
        sentences
    };
    pieces
        .iter()
        .map(|p| LIST_MARKER_REGEX.replace(p, "").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Truncate `items` to `len.max` and pad to `len.min` from the same
/// positions of `default`, falling back to `filler`.
fn fit_len(items: &mut Vec<Value>, len: Len, default: &Value, filler: impl Fn() -> Value) {
    items.truncate(len.max);
    let defaults = default.as_array();
    while items.len() < len.min {
        let pad = defaults
            .and_then(|d| d.get(items.len()))
            .cloned()
            .unwrap_or_else(&filler);
        items.push(pad);
    }
}

fn coerce_list(value: &Value, len: Len, max_chars: Option<usize>, default: &Value) -> Option<Value> {
    let raw: Vec<Value> = match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => split_items(s).into_iter().map(Value::String).collect(),
        Value::Object(map) => map.values().cloned().collect(),
        Value::Number(_) | Value::Bool(_) => vec![value.clone()],
        Value::Null => return None,
    };

    let mut items: Vec<Value> = raw
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(Value::String(match max_chars {
                Some(max) => truncate_chars(&s, max),
                None => s,
            })),
            Value::Number(_) => Some(item),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        })
        .collect();
    fit_len(&mut items, len, default, || json!(""));
    Some(Value::Array(items))
}

fn flatten_cells(cells: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Value::Array(inner) => out.extend(inner.iter().filter(|c| !c.is_array() && !c.is_object()).cloned()),
            Value::Object(map) => out.extend(map.values().filter(|c| !c.is_array() && !c.is_object()).cloned()),
            Value::Null => out.push(json!("")),
            other => out.push(other.clone()),
        }
    }
    out
}

fn fraction(cell: &Value) -> f64 {
    match as_number(cell) {
        Some(n) if n > 1.0 && n <= 100.0 => n / 100.0,
        Some(n) => n.clamp(0.0, 1.0),
        None => FALLBACK_FRACTION,
    }
}

/// `"info@acme.com | +1 555 0100"` becomes one row per part. A single
/// part becomes a `["Contact", text]` row.
fn text_rows(text: &str) -> Option<Vec<Vec<Value>>> {
    let parts: Vec<&str> = text.split('|').map(str::trim).filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [] => None,
        [single] => Some(vec![vec![Value::from(CONTACT_LABEL), Value::from(*single)]]),
        parts => Some(
            parts
                .iter()
                .map(|part| vec![Value::from(*part), Value::from("")])
                .collect(),
        ),
    }
}

fn fit_cell(cell: &mut Value, column: &Column) {
    match column {
        Column::Text { max_chars: None } => {}
        Column::Text { max_chars: Some(max) } => {
            if let Value::String(text) = cell {
                if text.chars().count() > *max {
                    *text = truncate_chars(text, *max);
                }
            }
        }
        Column::Fraction => {
            let progress = fraction(cell);
            *cell = json!(progress);
        }
        Column::Choice { allowed, fallback } => {
            let word = scalar_text(cell)
                .map(|w| w.trim().to_lowercase())
                .filter(|w| allowed.contains(w))
                .unwrap_or_else(|| fallback.clone());
            *cell = Value::String(word);
        }
    }
}

fn coerce_table(
    value: &Value,
    len: Len,
    columns: &[Column],
    split_text: bool,
    default: &Value,
) -> Option<Value> {
    let width = columns.len();
    let rows: Vec<Vec<Value>> = match value {
        Value::Array(rows) => rows
            .iter()
            .map(|row| match row {
                Value::Array(cells) => flatten_cells(cells),
                Value::Object(map) => flatten_cells(&map.values().cloned().collect::<Vec<_>>()),
                scalar => flatten_cells(std::slice::from_ref(scalar)),
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let mut row = vec![Value::String(k.clone())];
                row.extend(flatten_cells(std::slice::from_ref(v)));
                row
            })
            .collect(),
        Value::String(text) if split_text => text_rows(text)?,
        _ => return None,
    };

    let mut rows: Vec<Value> = rows
        .into_iter()
        .map(|mut cells| {
            cells.resize(width, json!(""));
            for (cell, column) in cells.iter_mut().zip(columns) {
                fit_cell(cell, column);
            }
            Value::Array(cells)
        })
        .collect();
    fit_len(&mut rows, len, default, || Value::Array(vec![json!(""); width]));
    Some(Value::Array(rows))
}

fn coerce_percentages(value: &Value, len: Len) -> Option<Value> {
    let raw: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return None,
    };

    let mut values: Vec<i64> = raw
        .into_iter()
        .map(|v| match v {
            // Percent strings are whole percentages here, not fractions.
            Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().unwrap_or(0.0),
            other => other.as_f64().unwrap_or(0.0),
        })
        .map(|v| v.round().max(0.0) as i64)
        .collect();
    values.truncate(len.max);
    values.resize(values.len().max(len.min), 0);
    if values.is_empty() {
        return None;
    }

    normalize_to_hundred(&mut values);
    Some(Value::Array(values.into_iter().map(Value::from).collect()))
}

/// Rescale `values` so they sum to exactly 100, each at least 1.
fn normalize_to_hundred(values: &mut [i64]) {
    let sum: i64 = values.iter().sum();
    if sum == 100 && values.iter().all(|&v| v >= 1) {
        return;
    }
    let n = values.len() as i64;
    if sum == 0 {
        values.iter_mut().for_each(|v| *v = 100 / n);
    } else {
        let factor = 100.0 / sum as f64;
        values
            .iter_mut()
            .for_each(|v| *v = ((*v as f64 * factor).round() as i64).max(1));
    }

    let remainder = 100 - values.iter().sum::<i64>();
    let largest = values
        .iter()
        .enumerate()
        .max_by_key(|(i, v)| (**v, std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    values[largest] += remainder;
}

/// Whole numbers stay integers so chart values read as the provider wrote them.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        json!(n)
    }
}

fn series_item(index: usize, name: Option<String>, values: Option<&Value>) -> Value {
    let values: Vec<Value> = values
        .and_then(Value::as_array)
        .map(|vals| vals.iter().map(|v| number_value(as_number(v).unwrap_or(0.0))).collect())
        .unwrap_or_default();
    let mut item = Map::new();
    item.insert(
        "name".to_string(),
        Value::String(name.unwrap_or_else(|| format!("Series {}", index + 1))),
    );
    item.insert("values".to_string(), Value::Array(values));
    Value::Object(item)
}

fn coerce_series(value: &Value, len: Len) -> Option<Value> {
    let mut series: Vec<Value> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .enumerate()
            .map(|(i, obj)| series_item(i, obj.get("name").and_then(scalar_text), obj.get("values")))
            .collect(),
        Value::Object(obj) if obj.contains_key("values") => {
            vec![series_item(0, obj.get("name").and_then(scalar_text), obj.get("values"))]
        }
        Value::Object(obj) => obj
            .iter()
            .filter(|(_, v)| v.is_array())
            .enumerate()
            .map(|(i, (name, values))| series_item(i, Some(name.clone()), Some(values)))
            .collect(),
        _ => return None,
    };

    series.truncate(len.max);
    while series.len() < len.min {
        series.push(series_item(series.len(), None, None));
    }
    Some(Value::Array(series))
}

fn coerce_quadrants(
    value: &Value,
    names: &[String],
    len: Len,
    max_chars: Option<usize>,
    default: &Value,
) -> Option<Value> {
    let Value::Object(map) = value else {
        return None;
    };
    let find = |name: &str| {
        map.iter()
            .find(|(key, v)| key.trim().eq_ignore_ascii_case(name) && !v.is_null())
            .map(|(_, v)| v)
    };
    if names.iter().all(|name| find(name.as_str()).is_none()) {
        return None;
    }

    let empty = Value::Array(Vec::new());
    let mut quadrants = Map::new();
    for name in names {
        let fallback = default.get(name.as_str()).unwrap_or(&empty);
        let raw = find(name.as_str()).unwrap_or(&empty);
        let items = coerce_list(raw, len, max_chars, fallback).unwrap_or_else(|| fallback.clone());
        quadrants.insert(name.clone(), items);
    }
    Some(Value::Object(quadrants))
}

fn column_item(
    index: usize,
    title: Option<String>,
    items: Option<&Value>,
    (title_key, items_key): (&str, &str),
    items_len: Len,
    default: &Value,
) -> Value {
    let fallback = default.get(index);
    let title = title
        .or_else(|| fallback.and_then(|d| d.get(title_key)).and_then(scalar_text))
        .unwrap_or_else(|| COLUMN_TITLE.to_string());

    let empty = Value::Array(Vec::new());
    let item_default = fallback.and_then(|d| d.get(items_key)).unwrap_or(&empty);
    let raw = items.filter(|v| !v.is_null()).unwrap_or(&empty);
    let items = coerce_list(raw, items_len, None, item_default).unwrap_or_else(|| empty.clone());

    let mut column = Map::new();
    column.insert(title_key.to_string(), Value::String(title));
    column.insert(items_key.to_string(), items);
    Value::Object(column)
}

fn coerce_columns(
    value: &Value,
    (title_key, items_key): (&str, &str),
    len: Len,
    items: Len,
    default: &Value,
) -> Option<Value> {
    let keys = (title_key, items_key);
    let parsed: Vec<(Option<String>, Option<Value>)> = match value {
        Value::Array(columns) => columns
            .iter()
            .filter_map(|column| match column {
                Value::Object(obj) if obj.contains_key(title_key) || obj.contains_key(items_key) => Some((
                    obj.get(title_key).and_then(scalar_text),
                    obj.get(items_key).cloned(),
                )),
                // ["To Do", "card", "card"]
                Value::Array(cells) if cells.len() >= 2 => {
                    Some((scalar_text(&cells[0]), Some(Value::Array(cells[1..].to_vec()))))
                }
                _ => None,
            })
            .collect(),
        // {"To Do": ["card", ...], ...}
        Value::Object(obj) => obj
            .iter()
            .filter(|(_, v)| v.is_array())
            .map(|(title, cards)| (Some(title.clone()), Some(cards.clone())))
            .collect(),
        _ => return None,
    };
    if parsed.is_empty() {
        return None;
    }

    let mut columns: Vec<Value> = parsed
        .into_iter()
        .take(len.max)
        .enumerate()
        .map(|(i, (title, cards))| column_item(i, title, cards.as_ref(), keys, items, default))
        .collect();
    while columns.len() < len.min {
        let index = columns.len();
        let cards = default.get(index).and_then(|d| d.get(items_key));
        columns.push(column_item(index, None, cards, keys, items, default));
    }
    Some(Value::Array(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pie(len: Len) -> FieldShape {
        FieldShape::Percentages {
            len,
            labels: None,
            legend: None,
        }
    }

    fn text(max: usize) -> FieldShape {
        FieldShape::Text {
            max_chars: Some(max),
        }
    }

    #[test]
    fn test_text_kept_when_short_enough() {
        assert_eq!(coerce(&text(10), &json!("Hello"), &json!("")), Coercion::Unchanged);
    }

    #[test]
    fn test_text_truncated_with_ellipsis() {
        assert_eq!(
            coerce(&text(8), &json!("Quarterly review"), &json!("")),
            Coercion::Coerced(json!("Quarter…"))
        );
    }

    #[test]
    fn test_text_from_number_and_rejected_object() {
        assert_eq!(coerce(&text(10), &json!(2026), &json!("")), Coercion::Coerced(json!("2026")));
        assert_eq!(coerce(&text(10), &json!({"a": 1}), &json!("")), Coercion::Rejected);
    }

    #[test]
    fn test_list_padded_from_default_and_truncated() {
        let shape = FieldShape::List {
            len: Len::exact(3),
            max_chars: None,
        };
        let default = json!(["x", "y", "z"]);
        assert_eq!(
            coerce(&shape, &json!(["a"]), &default),
            Coercion::Coerced(json!(["a", "y", "z"]))
        );
        assert_eq!(
            coerce(&shape, &json!(["a", "b", "c", "d"]), &default),
            Coercion::Coerced(json!(["a", "b", "c"]))
        );
    }

    #[test]
    fn test_list_from_bulleted_string() {
        let shape = FieldShape::List {
            len: Len::range(1, 5),
            max_chars: None,
        };
        assert_eq!(
            coerce(&shape, &json!("- Grow revenue\n- Cut costs\n2) Hire"), &json!([])),
            Coercion::Coerced(json!(["Grow revenue", "Cut costs", "Hire"]))
        );
        assert_eq!(
            coerce(&shape, &json!("We grew. Margins rose! Next?"), &json!([])),
            Coercion::Coerced(json!(["We grew.", "Margins rose!", "Next?"]))
        );
    }

    #[test]
    fn test_table_from_object_and_padded_rows() {
        let shape = FieldShape::Table {
            len: Len::exact(2),
            columns: vec![Column::unbounded(); 2],
            split_text: false,
        };
        let default = json!([["A", "1"], ["B", "2"]]);
        assert_eq!(
            coerce(&shape, &json!({"Founded": "2005"}), &default),
            Coercion::Coerced(json!([["Founded", "2005"], ["B", "2"]]))
        );
    }

    #[test]
    fn test_table_rows_resized_and_fraction_clamped() {
        let shape = FieldShape::Table {
            len: Len::range(1, 3),
            columns: vec![Column::unbounded(), Column::unbounded(), Column::Fraction],
            split_text: false,
        };
        let value = json!([
            ["Revenue", "82%", 0.82, "extra"],
            {"name": "Hiring", "shown": "90%", "progress": 90},
            ["Churn"]
        ]);
        assert_eq!(
            coerce(&shape, &value, &json!([])),
            Coercion::Coerced(json!([
                ["Revenue", "82%", 0.82],
                ["Hiring", "90%", 0.9],
                ["Churn", "", 0.5]
            ]))
        );
    }

    #[test]
    fn test_table_rejects_scalar() {
        let shape = FieldShape::Table {
            len: Len::exact(4),
            columns: vec![
                Column::text(25),
                Column::text(15),
                Column::text(10),
                Column::Fraction,
                Column::text(5),
            ],
            split_text: false,
        };
        assert_eq!(coerce(&shape, &json!("$6.2B"), &json!([])), Coercion::Rejected);
    }

    #[test]
    fn test_table_cells_truncated_per_column() {
        let shape = FieldShape::Table {
            len: Len::exact(1),
            columns: vec![Column::text(30), Column::text(40), Column::text(80)],
            split_text: false,
        };
        let long_name = "N".repeat(500);
        let Coercion::Coerced(Value::Array(rows)) =
            coerce(&shape, &json!([[long_name, "CEO", 2026]]), &json!([]))
        else {
            panic!("expected coercion");
        };
        let name = rows[0][0].as_str().unwrap();
        assert_eq!(name.chars().count(), 30);
        assert!(name.ends_with('…'));
        assert_eq!(rows[0][1], "CEO");
        assert_eq!(rows[0][2], 2026);
    }

    #[test]
    fn test_table_choice_column_normalized() {
        let shape = FieldShape::Table {
            len: Len::range(1, 6),
            columns: vec![
                Column::unbounded(),
                Column::choice(&["low", "medium", "high", "critical"], "medium"),
                Column::unbounded(),
            ],
            split_text: false,
        };
        assert_eq!(
            coerce(
                &shape,
                &json!([["Supply", " HIGH ", "x"], ["Talent", "severe", "y"], ["FX", 3, "z"]]),
                &json!([])
            ),
            Coercion::Coerced(json!([
                ["Supply", "high", "x"],
                ["Talent", "medium", "y"],
                ["FX", "medium", "z"]
            ]))
        );
    }

    #[test]
    fn test_contact_string_split_into_rows() {
        let shape = FieldShape::Table {
            len: Len::range(1, 4),
            columns: vec![Column::text(40), Column::text(60)],
            split_text: true,
        };
        assert_eq!(
            coerce(&shape, &json!("info@acme.com | +1 555 0100 | "), &json!([])),
            Coercion::Coerced(json!([["info@acme.com", ""], ["+1 555 0100", ""]]))
        );
        assert_eq!(
            coerce(&shape, &json!("info@acme.com"), &json!([])),
            Coercion::Coerced(json!([["Contact", "info@acme.com"]]))
        );
        assert_eq!(coerce(&shape, &json!(" | "), &json!([])), Coercion::Rejected);

        let unsplit = FieldShape::Table {
            len: Len::range(1, 4),
            columns: vec![Column::text(40), Column::text(60)],
            split_text: false,
        };
        assert_eq!(coerce(&unsplit, &json!("a | b"), &json!([])), Coercion::Rejected);
    }

    #[test]
    fn test_percentages_normalized_to_hundred() {
        let shape = pie(Len::range(3, 8));
        let Coercion::Coerced(Value::Array(values)) =
            coerce(&shape, &json!([30, 30, 30]), &json!([]))
        else {
            panic!("expected coercion");
        };
        let sum: i64 = values.iter().filter_map(Value::as_i64).sum();
        assert_eq!(sum, 100);
        assert!(values.iter().all(|v| v.as_i64().unwrap_or(0) >= 1));
    }

    #[test]
    fn test_percentages_already_valid() {
        let shape = pie(Len::range(3, 8));
        assert_eq!(coerce(&shape, &json!([50, 30, 20]), &json!([])), Coercion::Unchanged);
        assert_eq!(
            coerce(&shape, &json!(["50%", "30%", "20%"]), &json!([])),
            Coercion::Coerced(json!([50, 30, 20]))
        );
    }

    #[test]
    fn test_percentages_padded_without_zero_segments() {
        assert_eq!(
            coerce(&pie(Len::range(3, 8)), &json!([60, 40]), &json!([])),
            Coercion::Coerced(json!([59, 40, 1]))
        );
        assert_eq!(
            coerce(&pie(Len::range(3, 8)), &json!([70, 30, 0]), &json!([])),
            Coercion::Coerced(json!([69, 30, 1]))
        );
    }

    #[test]
    fn test_pie_labels_and_legend() {
        let values = json!([50, 30, 20]);
        let labels = fit_labels(&json!(["A", "B", "C", "D", "E"]), 3);
        assert_eq!(labels, json!(["A", "B", "C"]));
        assert_eq!(fit_labels(&json!(["A"]), 3), json!(["A", "Other", "Other"]));
        assert_eq!(legend(&labels, &values), json!(["A (50%)", "B (30%)", "C (20%)"]));
    }

    #[test]
    fn test_percentages_all_zero() {
        let mut values = vec![0, 0, 0];
        normalize_to_hundred(&mut values);
        assert_eq!(values, vec![34, 33, 33]);
    }

    #[test]
    fn test_series_padded_and_values_numeric() {
        let shape = FieldShape::Series {
            categories: "bar_categories".to_string(),
            len: Len::range(2, 4),
        };
        let value = json!([{"name": "FY25", "values": [1, "2", "n/a"]}, "junk"]);
        assert_eq!(
            coerce(&shape, &value, &json!([])),
            Coercion::Coerced(json!([
                {"name": "FY25", "values": [1, 2, 0]},
                {"name": "Series 2", "values": []}
            ]))
        );
    }

    #[test]
    fn test_series_from_name_to_values_object() {
        let shape = FieldShape::Series {
            categories: "line_categories".to_string(),
            len: Len::range(1, 4),
        };
        assert_eq!(
            coerce(&shape, &json!({"Revenue": [1, 2]}), &json!([])),
            Coercion::Coerced(json!([{"name": "Revenue", "values": [1, 2]}]))
        );
    }

    #[test]
    fn test_fit_series_to_categories() {
        let mut value = json!([{"name": "a", "values": [1, 2, 3, 4]}, {"name": "b", "values": [1]}]);
        assert!(fit_series(&mut value, 3));
        assert_eq!(
            value,
            json!([{"name": "a", "values": [1, 2, 3]}, {"name": "b", "values": [1, 0, 0]}])
        );
        assert!(!fit_series(&mut value, 3));
    }

    fn swot() -> FieldShape {
        FieldShape::Quadrants {
            names: vec!["strengths".to_string(), "threats".to_string()],
            len: Len::exact(3),
            max_chars: Some(10),
        }
    }

    fn kanban() -> FieldShape {
        FieldShape::Columns {
            title_key: "title".to_string(),
            items_key: "cards".to_string(),
            len: Len::exact(3),
            items: Len::range(0, 2),
        }
    }

    #[test]
    fn test_quadrants_reshaped() {
        let default = json!({"strengths": ["s1", "s2", "s3"], "threats": ["t1", "t2", "t3"]});
        assert_eq!(
            coerce(
                &swot(),
                &json!({"Strengths": "Brand. Reach loyalty matters.", "extra": [1]}),
                &default
            ),
            Coercion::Coerced(json!({
                "strengths": ["Brand.", "Reach loy…", "s3"],
                "threats": ["t1", "t2", "t3"]
            }))
        );
        assert_eq!(coerce(&swot(), &default, &default), Coercion::Unchanged);
    }

    #[test]
    fn test_quadrants_reject_unusable_values() {
        let default = json!({"strengths": ["s1", "s2", "s3"], "threats": ["t1", "t2", "t3"]});
        assert_eq!(coerce(&swot(), &json!([1, 2]), &default), Coercion::Rejected);
        assert_eq!(coerce(&swot(), &json!({"wins": ["a"]}), &default), Coercion::Rejected);
    }

    #[test]
    fn test_columns_reshaped_and_padded() {
        let default = json!([
            {"title": "To Do", "cards": ["d1"]},
            {"title": "Doing", "cards": ["d2"]},
            {"title": "Done", "cards": ["d3"]}
        ]);
        assert_eq!(
            coerce(
                &kanban(),
                &json!([{"cards": "Write plan", "owner": "me"}, ["Doing", "a", "b", "c"], 7]),
                &default
            ),
            Coercion::Coerced(json!([
                {"title": "To Do", "cards": ["Write plan"]},
                {"title": "Doing", "cards": ["a", "b"]},
                {"title": "Done", "cards": ["d3"]}
            ]))
        );
        assert_eq!(
            coerce(&kanban(), &json!({"Backlog": ["x"]}), &json!([])),
            Coercion::Coerced(json!([
                {"title": "Backlog", "cards": ["x"]},
                {"title": "Column", "cards": []},
                {"title": "Column", "cards": []}
            ]))
        );
        assert_eq!(coerce(&kanban(), &default, &default), Coercion::Unchanged);
    }

    #[test]
    fn test_columns_reject_unusable_values() {
        assert_eq!(coerce(&kanban(), &json!({"x": "y"}), &json!([])), Coercion::Rejected);
        assert_eq!(coerce(&kanban(), &json!([1, 2]), &json!([])), Coercion::Rejected);
        assert_eq!(coerce(&kanban(), &json!("todo"), &json!([])), Coercion::Rejected);
    }
}
