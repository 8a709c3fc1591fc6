//! Decoding a field map into a typed option record.
//!
//! Decoding is total: instead of unwinding on malformed input, every block
//! produces a [`DecodeOutcome`] that is either a valid [`OptionRecord`] or a
//! [`DecodeDiagnostic`] naming the source and a bounded excerpt of the
//! offending text. Callers branch on the outcome; a diagnostic is a
//! recoverable per-option failure, never fatal to the run.

use fastlane_meta_core::OptionRecord;

use crate::fields::{FieldMap, FieldValue};

/// Maximum length of the offending-text excerpt carried by a diagnostic.
const EXCERPT_LEN: usize = 90;

/// Outcome of decoding one field map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The block decoded into a valid option record.
    Decoded(OptionRecord),
    /// The block was structurally unusable; the option is dropped.
    Invalid(DecodeDiagnostic),
}

/// Diagnostic for a dropped option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeDiagnostic {
    /// Tool or action identifier the block came from.
    pub source: String,
    /// What made the block unusable.
    pub reason: String,
    /// Bounded excerpt of the offending block text.
    pub excerpt: String,
}

impl std::fmt::Display for DecodeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.source, self.reason, self.excerpt)
    }
}

/// Decodes a [`FieldMap`] into an [`OptionRecord`].
///
/// Missing optional fields take their documented defaults (`is_string =
/// true`, `optional = false`, `sensitive = false`). A map without a `name`
/// field, or with a type-mismatched field (e.g. `optional:` bound to text),
/// yields an [`DecodeOutcome::Invalid`] diagnostic.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use fastlane_meta_extract::decode::{DecodeOutcome, decode_option};
/// use fastlane_meta_extract::fields::FieldValue;
///
/// let mut fields = HashMap::new();
/// fields.insert("name".to_string(), FieldValue::Text("username".into()));
/// fields.insert("optional".to_string(), FieldValue::Bool(true));
///
/// match decode_option(&fields, "match", false, "key: :username") {
///     DecodeOutcome::Decoded(record) => {
///         assert_eq!(record.name, "username");
///         assert!(record.optional);
///         assert!(record.is_string);
///     }
///     DecodeOutcome::Invalid(diag) => panic!("unexpected: {diag}"),
/// }
/// ```
pub fn decode_option(
    fields: &FieldMap,
    source: &str,
    is_action: bool,
    block_text: &str,
) -> DecodeOutcome {
    let invalid = |reason: String| {
        DecodeOutcome::Invalid(DecodeDiagnostic {
            source: source.to_string(),
            reason,
            excerpt: excerpt(block_text),
        })
    };

    let name = match fields.get("name").map(FieldValue::as_text) {
        Some(Some(name)) if !name.is_empty() => name.to_string(),
        Some(_) => return invalid("name field is not text".to_string()),
        None => return invalid("no name field resolved".to_string()),
    };

    let mut record = OptionRecord::new(&name);
    record.is_action = is_action;

    match text_field(fields, "description") {
        Ok(value) => record.description = value,
        Err(reason) => return invalid(reason),
    }
    match text_field(fields, "env_name") {
        Ok(value) => record.env_name = value,
        Err(reason) => return invalid(reason),
    }
    match text_field(fields, "type") {
        Ok(value) => record.type_tag = value,
        Err(reason) => return invalid(reason),
    }
    match text_field(fields, "short_option") {
        Ok(value) => record.short_option = value,
        Err(reason) => return invalid(reason),
    }
    match bool_field(fields, "is_string", true) {
        Ok(value) => record.is_string = value,
        Err(reason) => return invalid(reason),
    }
    match bool_field(fields, "optional", false) {
        Ok(value) => record.optional = value,
        Err(reason) => return invalid(reason),
    }
    match bool_field(fields, "sensitive", false) {
        Ok(value) => record.sensitive = value,
        Err(reason) => return invalid(reason),
    }

    DecodeOutcome::Decoded(record)
}

fn text_field(fields: &FieldMap, key: &str) -> Result<Option<String>, String> {
    match fields.get(key) {
        None => Ok(None),
        Some(FieldValue::Text(text)) => Ok(Some(text.clone())),
        Some(other) => Err(format!("field '{key}' is not text: {other:?}")),
    }
}

fn bool_field(fields: &FieldMap, key: &str, default: bool) -> Result<bool, String> {
    match fields.get(key) {
        None => Ok(default),
        Some(FieldValue::Bool(value)) => Ok(*value),
        Some(other) => Err(format!("field '{key}' is not boolean: {other:?}")),
    }
}

fn excerpt(block_text: &str) -> String {
    let flattened: String = block_text.split_whitespace().collect::<Vec<_>>().join(" ");
    flattened.chars().take(EXCERPT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(entries: &[(&str, FieldValue)]) -> FieldMap {
        let mut fields = HashMap::new();
        for (key, value) in entries {
            fields.insert(key.to_string(), value.clone());
        }
        fields
    }

    #[test]
    fn test_decode_with_defaults() {
        let fields = map(&[("name", FieldValue::Text("team_id".into()))]);
        let DecodeOutcome::Decoded(record) = decode_option(&fields, "sigh", false, "") else {
            panic!("expected decoded record");
        };
        assert_eq!(record.name, "team_id");
        assert!(record.is_string);
        assert!(!record.optional);
        assert!(!record.sensitive);
        assert!(!record.is_action);
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let fields = map(&[("optional", FieldValue::Bool(true))]);
        let DecodeOutcome::Invalid(diag) =
            decode_option(&fields, "gym", false, "optional: true")
        else {
            panic!("expected invalid outcome");
        };
        assert_eq!(diag.source, "gym");
        assert!(diag.reason.contains("name"));
    }

    #[test]
    fn test_type_mismatch_is_invalid_not_fatal() {
        let fields = map(&[
            ("name", FieldValue::Text("force".into())),
            ("optional", FieldValue::Text("yes".into())),
        ]);
        let DecodeOutcome::Invalid(diag) = decode_option(&fields, "pem", false, "") else {
            panic!("expected invalid outcome");
        };
        assert!(diag.reason.contains("optional"));
    }

    #[test]
    fn test_is_action_comes_from_caller() {
        let fields = map(&[("name", FieldValue::Text("slack_url".into()))]);
        let DecodeOutcome::Decoded(record) = decode_option(&fields, "slack", true, "") else {
            panic!("expected decoded record");
        };
        assert!(record.is_action);
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let long_block = "x: 'y', ".repeat(100);
        let fields = FieldMap::new();
        let DecodeOutcome::Invalid(diag) = decode_option(&fields, "scan", false, &long_block)
        else {
            panic!("expected invalid outcome");
        };
        assert!(diag.excerpt.chars().count() <= 90);
    }
}
