//! Response repair: turn raw model output into strict JSON.
//!
//! Repair is an ordered list of independent [`RepairStep`]s followed by a
//! strict parse. Each step is idempotent and leaves well-formed JSON alone,
//! so a clean document passes through byte-for-byte.

use crate::error::RepairError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Regex matching a reasoning block emitted by thinking models.
static REASONING_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Regex matching a JSON number literal, whole token.
static NUMBER_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap());

const FENCE: &str = "```";

/// Characters of context kept on each side of a parse failure.
const SNIPPET_RADIUS: usize = 40;

/// One text transform of the repair pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStep {
    /// Remove `<think>...</think>` blocks.
    StripReasoning,
    /// Remove Markdown code fences and prose around the root object.
    StripCodeFence,
    /// Quote bare value tokens, single-quoted strings and bare keys.
    QuoteBareTokens,
    /// Drop commas directly before `}` or `]`.
    RemoveTrailingCommas,
    /// Escape raw control characters inside strings.
    EscapeControlChars,
}

impl RepairStep {
    /// Every step, in the order the repairer applies them.
    pub const ALL: [RepairStep; 5] = [
        RepairStep::StripReasoning,
        RepairStep::StripCodeFence,
        RepairStep::QuoteBareTokens,
        RepairStep::RemoveTrailingCommas,
        RepairStep::EscapeControlChars,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RepairStep::StripReasoning => "strip-reasoning",
            RepairStep::StripCodeFence => "strip-code-fence",
            RepairStep::QuoteBareTokens => "quote-bare-tokens",
            RepairStep::RemoveTrailingCommas => "remove-trailing-commas",
            RepairStep::EscapeControlChars => "escape-control-chars",
        }
    }

    /// Apply this transform to `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            RepairStep::StripReasoning => strip_reasoning(text),
            RepairStep::StripCodeFence => strip_code_fence(text),
            RepairStep::QuoteBareTokens => quote_bare_tokens(text),
            RepairStep::RemoveTrailingCommas => remove_trailing_commas(text),
            RepairStep::EscapeControlChars => escape_control_chars(text),
        }
    }
}

/// Runs the repair steps in order, then parses strictly.
#[derive(Debug, Clone)]
pub struct ResponseRepairer {
    steps: Vec<RepairStep>,
}

impl Default for ResponseRepairer {
    fn default() -> Self {
        Self {
            steps: RepairStep::ALL.to_vec(),
        }
    }
}

impl ResponseRepairer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom step list instead of [`RepairStep::ALL`].
    pub fn with_steps(steps: impl Into<Vec<RepairStep>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    pub fn steps(&self) -> &[RepairStep] {
        &self.steps
    }

    /// Apply every step to `raw` without parsing.
    pub fn apply_steps(&self, raw: &str) -> String {
        self.steps.iter().fold(raw.to_string(), |text, step| {
            let next = step.apply(&text);
            if next != text {
                log::debug!("Repair step {} changed the response", step.name());
            }
            next
        })
    }

    /// Repair `raw` and return the text, guaranteed to parse as JSON.
    pub fn repair(&self, raw: &str) -> Result<String, RepairError> {
        let text = self.apply_steps(raw);
        parse_strict(&text)?;
        Ok(text)
    }

    /// Repair `raw` and parse it.
    pub fn repair_to_value(&self, raw: &str) -> Result<Value, RepairError> {
        parse_strict(&self.apply_steps(raw))
    }
}

fn parse_strict(text: &str) -> Result<Value, RepairError> {
    serde_json::from_str(text).map_err(|e| {
        let offset = byte_offset(text, e.line(), e.column());
        RepairError {
            reason: e.to_string(),
            offending_snippet: snippet_around(text, offset),
        }
    })
}

/// Convert serde_json's 1-based line and column into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let mut offset = (line_start + column.saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

fn snippet_around(text: &str, offset: usize) -> String {
    let before: Vec<char> = text[..offset].chars().rev().take(SNIPPET_RADIUS).collect();
    let after = text[offset..].chars().take(SNIPPET_RADIUS);
    before.into_iter().rev().chain(after).collect()
}

fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK_REGEX.replace_all(text, "").into_owned()
}

fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let fenced = trimmed.starts_with(FENCE) || trimmed.ends_with(FENCE);
    if !fenced && starts_structured(trimmed) {
        return match trim_trailing_prose(trimmed) {
            Some(root) => root.to_string(),
            None => text.to_string(),
        };
    }

    let mut body = trimmed;
    loop {
        let before = body;
        if let Some(rest) = body.strip_prefix(FENCE) {
            // Drop the language tag line, if any.
            body = match rest.find('\n') {
                Some(newline) => &rest[newline + 1..],
                None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
            };
            body = body.trim();
        }
        if let Some(rest) = body.strip_suffix(FENCE) {
            body = rest.trim();
        }
        if body == before {
            break;
        }
    }

    if !starts_structured(body) {
        if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) {
            if start < end {
                body = &body[start..=end];
            }
        }
    }
    trim_trailing_prose(body).unwrap_or(body).to_string()
}

fn starts_structured(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}

/// The root up to its last closing bracket, when text follows it.
fn trim_trailing_prose(text: &str) -> Option<&str> {
    let close = match text.chars().next()? {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };
    let end = text.rfind(close)?;
    if text[end + 1..].trim().is_empty() {
        return None;
    }
    Some(&text[..=end])
}

/// Copy the double-quoted string starting at `chars[start]` into `out`.
/// Returns the index just past the closing quote.
fn copy_string(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push(chars[start]);
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' if i < chars.len() => {
                out.push(chars[i]);
                i += 1;
            }
            '"' => break,
            _ => {}
        }
    }
    i
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Key,
    Value,
    Delimiter,
}

fn quote_bare_tokens(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<char> = Vec::new();
    let mut expect = Expect::Delimiter;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            i = copy_string(&chars, i, &mut out);
            expect = Expect::Delimiter;
            continue;
        }
        if stack.is_empty() && c != '{' && c != '[' {
            out.push(c);
            i += 1;
            continue;
        }
        match c {
            '{' => {
                stack.push(c);
                expect = Expect::Key;
            }
            '[' => {
                stack.push(c);
                expect = Expect::Value;
            }
            '}' | ']' => {
                stack.pop();
                expect = Expect::Delimiter;
            }
            ':' => expect = Expect::Value,
            ',' => {
                expect = if stack.last() == Some(&'{') {
                    Expect::Key
                } else {
                    Expect::Value
                };
            }
            c if c.is_whitespace() => {}
            '\'' => {
                i = convert_single_quoted(&chars, i, &mut out);
                expect = Expect::Delimiter;
                continue;
            }
            _ => {
                let stop: &[char] = if expect == Expect::Key {
                    &[':', '}', '\n']
                } else {
                    &[',', ']', '}', '\n']
                };
                let end = chars[i..]
                    .iter()
                    .position(|ch| stop.contains(ch))
                    .map_or(chars.len(), |p| i + p);
                let raw: String = chars[i..end].iter().collect();
                let token = raw.trim_end();
                if expect != Expect::Key && is_literal(token) {
                    out.push_str(token);
                } else {
                    push_quoted(token, &mut out);
                }
                out.push_str(&raw[token.len()..]);
                i = end;
                expect = Expect::Delimiter;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut value = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                if chars[i + 1] == '\'' {
                    value.push('\'');
                } else {
                    value.push('\\');
                    value.push(chars[i + 1]);
                }
                i += 2;
            }
            '\'' => {
                i += 1;
                break;
            }
            '"' => {
                value.push_str("\\\"");
                i += 1;
            }
            ch => {
                value.push(ch);
                i += 1;
            }
        }
    }
    out.push('"');
    out.push_str(&value);
    out.push('"');
    i
}

fn is_literal(token: &str) -> bool {
    matches!(token, "true" | "false" | "null") || NUMBER_LITERAL_REGEX.is_match(token)
}

fn push_quoted(token: &str, out: &mut String) {
    out.push('"');
    for c in token.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn remove_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => i = copy_string(&chars, i, &mut out),
            ',' => {
                let next = chars[i + 1..]
                    .iter()
                    .find(|ch| !ch.is_whitespace() && **ch != ',');
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(',');
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if !in_string {
            in_string = c == '"';
            out.push(c);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CLEAN: &str = r#"{"selected_slides": ["kpi_dashboard"], "sections": [], "content": {"kpi_title": "Q4: \"up\", 12%", "ratio": -1.5e3, "ok": true, "none": null}}"#;

    #[test]
    fn test_strip_reasoning() {
        let text = "<think>let me plan\nthe deck</think>{\"a\": 1}";
        assert_eq!(RepairStep::StripReasoning.apply(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_with_language_tag() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(RepairStep::StripCodeFence.apply(text), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fence_without_language_tag() {
        let text = "  ```\n[1, 2]\n```  ";
        assert_eq!(RepairStep::StripCodeFence.apply(text), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fence_drops_surrounding_prose() {
        let text = "Here is your deck:\n```json\n{\"a\": {\"b\": 2}}\n```\nLet me know!";
        assert_eq!(RepairStep::StripCodeFence.apply(text), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_strip_code_fence_leaves_bare_json_alone() {
        let text = "\n{\"a\": 1}\n";
        assert_eq!(RepairStep::StripCodeFence.apply(text), text);
    }

    #[test]
    fn test_strip_code_fence_drops_trailing_prose() {
        assert_eq!(
            RepairStep::StripCodeFence.apply("{\"a\": \"x\"} thanks!"),
            "{\"a\": \"x\"}"
        );
        assert_eq!(RepairStep::StripCodeFence.apply("[1, [2]]\nHope this helps."), "[1, [2]]");
        assert_eq!(
            RepairStep::StripCodeFence.apply("```json\n{\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
    }

    #[test]
    fn test_repair_document_followed_by_prose() {
        let value = ResponseRepairer::new()
            .repair_to_value("{\"a\": \"x\"} thanks!")
            .unwrap();
        assert_eq!(value, json!({"a": "x"}));
    }

    #[test]
    fn test_quote_bare_tokens() {
        let text = r#"{"revenue": $6.2B, "share": 85%, "multiple": [2.3x, 4], "n": 12}"#;
        assert_eq!(
            RepairStep::QuoteBareTokens.apply(text),
            r#"{"revenue": "$6.2B", "share": "85%", "multiple": ["2.3x", 4], "n": 12}"#
        );
    }

    #[test]
    fn test_quote_bare_tokens_converts_single_quotes_and_bare_keys() {
        let text = r#"{title: 'It\'s "big"', 'list': ['a', 'b']}"#;
        let repaired = RepairStep::QuoteBareTokens.apply(text);
        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["list"], json!(["a", "b"]));
        assert_eq!(value["title"], json!("It's \"big\""));
    }

    #[test]
    fn test_quote_bare_tokens_ignores_string_content() {
        let text = r#"{"note": "costs $6.2B, {not: json}"}"#;
        assert_eq!(RepairStep::QuoteBareTokens.apply(text), text);
    }

    #[test]
    fn test_remove_trailing_commas() {
        let text = r#"{"a": [1, 2,], "b": {"c": 3,  },}"#;
        assert_eq!(
            RepairStep::RemoveTrailingCommas.apply(text),
            r#"{"a": [1, 2], "b": {"c": 3  }}"#
        );
    }

    #[test]
    fn test_remove_trailing_commas_keeps_commas_in_strings() {
        let text = r#"{"a": "x,]"}"#;
        assert_eq!(RepairStep::RemoveTrailingCommas.apply(text), text);
    }

    #[test]
    fn test_escape_control_chars() {
        let text = "{\"a\": \"line one\nline\ttwo\"}";
        assert_eq!(
            RepairStep::EscapeControlChars.apply(text),
            "{\"a\": \"line one\\nline\\ttwo\"}"
        );
    }

    #[test]
    fn test_escape_control_chars_leaves_structure_whitespace() {
        let text = "{\n  \"a\": \"b\\n\"\n}";
        assert_eq!(RepairStep::EscapeControlChars.apply(text), text);
    }

    #[test]
    fn test_clean_document_passes_through_unchanged() {
        let repairer = ResponseRepairer::new();
        assert_eq!(repairer.repair(CLEAN).unwrap(), CLEAN);
    }

    #[test]
    fn test_repair_is_idempotent() {
        let repairer = ResponseRepairer::new();
        let raw = "<think>hm</think>```json\n{title: 'Deck', \"kpis\": [85%, 2.3x,],\n\"note\": \"a\nb\",}\n```";
        let once = repairer.repair(raw).unwrap();
        let twice = repairer.repair(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_step_is_idempotent() {
        let raw = "Sure!\n```json\n{key: 'v', \"n\": $5, \"s\": \"x\ty\", \"l\": [1,,]}\n```";
        for step in RepairStep::ALL {
            let once = step.apply(raw);
            assert_eq!(step.apply(&once), once, "{} is not idempotent", step.name());
        }
    }

    #[test]
    fn test_repair_fenced_document_with_bare_value() {
        let raw = "```json\n{\"selected_slides\": [\"kpi_dashboard\",], \"sections\": [], \"content\": {\"kpi_title\": \"Q4\", \"kpis\": $6.2B}}\n```";
        let value = ResponseRepairer::new().repair_to_value(raw).unwrap();
        assert_eq!(value["selected_slides"], json!(["kpi_dashboard"]));
        assert_eq!(value["content"]["kpis"], json!("$6.2B"));
        assert_eq!(value["content"]["kpi_title"], json!("Q4"));
    }

    #[test]
    fn test_unrepairable_text_reports_snippet() {
        let err = ResponseRepairer::new()
            .repair("{\"a\": [1, 2}")
            .unwrap_err();
        assert!(!err.reason.is_empty());
        assert!(err.offending_snippet.contains("[1, 2"));
    }

    #[test]
    fn test_empty_text_is_an_error() {
        assert!(ResponseRepairer::new().repair("   ").is_err());
    }

    #[test]
    fn test_snippet_is_bounded() {
        let text = "x".repeat(200);
        let snippet = snippet_around(&text, 100);
        assert_eq!(snippet.chars().count(), 2 * SNIPPET_RADIUS);
    }
}
