//! Field parsing for a single option declaration block.
//!
//! Converts the raw lines of one `ConfigItem` block into a [`FieldMap`] of
//! declared field name → decoded value. The parser is deliberately narrow:
//! it understands the handful of literal shapes that appear in real option
//! declarations (quoted strings, booleans, integers, `nil`) and silently
//! discards everything else — arithmetic, constant references, lambdas —
//! rather than attempting to evaluate Ruby.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::CONFIG_ITEM_MARKER;

/// Decoded raw value of one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Quoted string, or `nil` (decoded as empty text).
    Text(String),
    /// `true` / `false` literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
}

impl FieldValue {
    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// Mapping of declared field name → decoded value for one block.
///
/// Duplicate declarations keep the last value.
pub type FieldMap = HashMap<String, FieldValue>;

// All regexes here are compile-time constants. An expect() failure indicates
// a programmer error in the pattern, not a runtime condition.
static KEY_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*key:\s+:([a-z0-9_]+),").expect("static regex must compile")
});
static CONSTRUCTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s*{}\(", regex::escape(CONFIG_ITEM_MARKER)))
        .expect("static regex must compile")
});
static INT_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("static regex must compile"));

/// Parses one raw block into a [`FieldMap`].
///
/// Returns `None` when the block yields no recognizable fields (including
/// empty blocks); such blocks are dropped, never treated as errors.
///
/// # Examples
///
/// ```
/// use fastlane_meta_extract::fields::{FieldValue, parse_fields};
///
/// let block = vec![
///     "    FastlaneCore::ConfigItem.new(key: :username,".to_string(),
///     "                                 optional: true)".to_string(),
/// ];
/// let fields = parse_fields(&block).unwrap();
/// assert_eq!(fields["name"], FieldValue::Text("username".into()));
/// assert_eq!(fields["optional"], FieldValue::Bool(true));
/// ```
pub fn parse_fields(block: &[String]) -> Option<FieldMap> {
    if block.is_empty() {
        return None;
    }

    let mut fields = FieldMap::new();
    let mut baseline_indent: Option<usize> = None;

    for (idx, raw) in block.iter().enumerate() {
        let line = if idx == 0 {
            CONSTRUCTOR_RE.replace(raw, "").into_owned()
        } else {
            raw.clone()
        };

        if let Some(caps) = KEY_FIELD_RE.captures(&line) {
            fields.insert("name".to_string(), FieldValue::Text(caps[1].to_string()));
            continue;
        }

        // Indentation-depth gating: anything deeper than the baseline is the
        // body of a nested sub-block (verify_block, default_value lambda) and
        // is skipped outright.
        let indent = leading_whitespace_width(&line);
        if let Some(baseline) = baseline_indent
            && indent > baseline
        {
            continue;
        }

        if line.trim() == "end" {
            continue;
        }

        if baseline_indent.is_none() {
            baseline_indent = Some(indent);
        }

        let stripped = strip_trailing_comment(&line);
        let stripped = stripped.trim_end_matches([',', ')', '\r']);

        let Some((name, raw_value)) = stripped.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        if let Some(value) = decode_value(raw_value.trim()) {
            fields.insert(name.to_string(), value);
        }
    }

    if fields.is_empty() { None } else { Some(fields) }
}

fn leading_whitespace_width(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Truncates a trailing `#` comment, unless the marker sits inside a quoted
/// string (i.e. a quote character appears after the last `#`).
fn strip_trailing_comment(line: &str) -> &str {
    let Some(hash) = line.rfind('#') else {
        return line;
    };
    match line.rfind(['\'', '"']) {
        Some(quote) if quote > hash => line,
        _ => &line[..hash],
    }
}

/// Decodes a raw value expression into a [`FieldValue`].
///
/// Expressions that match none of the recognized literal shapes are
/// discarded (`None`) to tolerate arithmetic and variable references.
fn decode_value(value: &str) -> Option<FieldValue> {
    if let Some(inner) = value.strip_prefix('\'') {
        let inner = inner.strip_suffix('\'').unwrap_or(inner);
        return Some(FieldValue::Text(inner.to_string()));
    }
    if value.starts_with('"') {
        return Some(FieldValue::Text(decode_double_quoted(value)));
    }
    match value {
        "nil" => Some(FieldValue::Text(String::new())),
        "true" => Some(FieldValue::Bool(true)),
        "false" => Some(FieldValue::Bool(false)),
        _ if INT_LITERAL_RE.is_match(value) => value.parse().ok().map(FieldValue::Int),
        _ => None,
    }
}

/// Decodes a double-quoted value, tolerating line-continuation artifacts
/// where the closing quote is missing or preceded by a dangling backslash.
fn decode_double_quoted(value: &str) -> String {
    let mut body = &value[1..];
    if let Some(stripped) = body.strip_suffix('"') {
        body = if stripped.ends_with('\\') {
            stripped.trim_end_matches('\\')
        } else {
            stripped
        };
    } else {
        body = body.trim_end_matches('\\');
    }
    unescape(body)
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
