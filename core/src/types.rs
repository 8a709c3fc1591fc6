//! Option record and argument descriptor types.
//!
//! This module defines the normalized representation of a single fastlane
//! configuration option ([`OptionRecord`]) and the derived argument
//! descriptor ([`ArgumentSpec`]) that ends up in the synthesized metadata
//! document. Argument descriptors are designed for serialization with
//! [`serde`] and follow the generator's wire contract: camelCase keys and
//! default-valued fields omitted entirely.

use serde::{Deserialize, Serialize};

/// One configuration option as declared in a fastlane source text, after
/// normalization.
///
/// Produced by the extraction pipeline from a `FastlaneCore::ConfigItem.new`
/// declaration block. A record always carries a resolved `name`; blocks
/// without one are rejected upstream and never reach this type.
///
/// # Examples
///
/// ```
/// use fastlane_meta_core::OptionRecord;
///
/// let record = OptionRecord::new("username");
/// assert!(record.is_string);
/// assert!(!record.optional);
/// assert!(!record.sensitive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    /// Option key as declared in the source (e.g. `username`).
    pub name: String,
    /// Human-readable description, if declared.
    pub description: Option<String>,
    /// Environment variable backing the option, if declared.
    pub env_name: Option<String>,
    /// Whether the option takes a string value (`true` unless the source
    /// declares `is_string: false`).
    pub is_string: bool,
    /// Free-form declared type tag (e.g. `Array`).
    pub type_tag: Option<String>,
    /// Whether the option may be omitted.
    pub optional: bool,
    /// Whether the value is sensitive (passwords, API keys).
    pub sensitive: bool,
    /// Single-letter short option, if declared.
    pub short_option: Option<String>,
    /// Whether the source was an auto-discovered action rather than a named
    /// tool. Set by the pipeline based on the source collection, never parsed
    /// from text.
    pub is_action: bool,
}

impl OptionRecord {
    /// Creates a record with the given name and documented defaults
    /// (`is_string = true`, everything else off/empty).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            env_name: None,
            is_string: true,
            type_tag: None,
            optional: false,
            sensitive: false,
            short_option: None,
            is_action: false,
        }
    }
}

/// Value type of a generated argument.
///
/// Wire labels match the generator's type vocabulary: `"string"`, `"bool"`,
/// and `"List<string>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueKind {
    /// Plain string value (the default).
    #[default]
    #[serde(rename = "string")]
    String,
    /// Boolean switch.
    #[serde(rename = "bool")]
    Boolean,
    /// Comma-joined list of strings.
    #[serde(rename = "List<string>")]
    StringList,
}

/// A generated argument descriptor, derived from one [`OptionRecord`].
///
/// Serialized into the `properties` array of a task's settings class.
/// Default-valued fields (`secret: false`, empty `help`, absent `separator`)
/// are omitted from the output, not emitted as `false`/`null`.
///
/// # Examples
///
/// ```
/// use fastlane_meta_core::{ArgumentSpec, ValueKind};
///
/// let arg = ArgumentSpec {
///     name: "Username".into(),
///     format: "--username={value}".into(),
///     secret: false,
///     help: "Your Apple ID Username.".into(),
///     value_kind: ValueKind::String,
///     separator: None,
/// };
/// let json = serde_json::to_string(&arg).unwrap();
/// assert!(!json.contains("secret"));
/// assert!(!json.contains("separator"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentSpec {
    /// Collision-safe display identifier (e.g. `ReadOnlyFlag`).
    pub name: String,
    /// Template describing how the raw option key is rendered on the
    /// command line (e.g. `--username={value}`).
    pub format: String,
    /// Mirrors the option's `sensitive` flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub secret: bool,
    /// Normalized help text (markup-escaped, trailing period enforced).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    /// Value type of the argument.
    #[serde(rename = "type")]
    pub value_kind: ValueKind,
    /// List separator; present only when `value_kind` is a list type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
