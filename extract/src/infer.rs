//! Value-type and display-name inference for option records.
//!
//! Derives the generated argument descriptor from a normalized
//! [`OptionRecord`]: value kind, collision-safe display name, format
//! template, and normalized help text.

use std::sync::LazyLock;

use regex::Regex;

use fastlane_meta_core::{ArgumentSpec, OptionRecord, ValueKind};

static CODE_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.+?)`").expect("static regex must compile"));

/// Derives the full argument descriptor for one option record.
pub fn argument_from_record(record: &OptionRecord) -> ArgumentSpec {
    let value_kind = infer_value_kind(record);
    ArgumentSpec {
        name: display_name(&record.name),
        format: format_template(&record.name, record.is_action),
        secret: record.sensitive,
        help: normalize_help(record.description.as_deref()),
        value_kind,
        separator: (value_kind == ValueKind::StringList).then_some(','),
    }
}

/// Decides the argument's value kind.
///
/// The priority order is deliberate and order-dependent; do not reorder:
/// 1. comma-separated description (only when the declared type is not
///    `Array`) → list,
/// 2. `is_string == false` → boolean,
/// 3. declared type `Array` → list,
/// 4. otherwise → string.
pub fn infer_value_kind(record: &OptionRecord) -> ValueKind {
    if describes_comma_separated_list(record) {
        ValueKind::StringList
    } else if !record.is_string {
        ValueKind::Boolean
    } else if record.type_tag.as_deref() == Some("Array") {
        ValueKind::StringList
    } else {
        ValueKind::String
    }
}

fn describes_comma_separated_list(record: &OptionRecord) -> bool {
    if record.type_tag.as_deref() == Some("Array") {
        return false;
    }
    let Some(description) = record.description.as_deref() else {
        return false;
    };
    let lower = description.to_lowercase();
    lower.contains("comma-separated") || lower.contains("comma separated")
}

/// Pascal-cases an underscore-separated identifier (`team_id` → `TeamId`).
pub fn pascal_case(raw: &str) -> String {
    raw.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derives the collision-safe display identifier for an option name.
///
/// A handful of pascalized names collide with reserved words in common
/// target-language syntaxes and are remapped (case-insensitively).
pub fn display_name(raw: &str) -> String {
    let pascal = pascal_case(raw);
    match pascal.to_lowercase().as_str() {
        "readonly" => "ReadOnlyFlag".to_string(),
        "private" => "PrivateFlag".to_string(),
        "params" => "ParamsValue".to_string(),
        "base" => "BaseValue".to_string(),
        _ => pascal,
    }
}

/// Builds the format template rendering the raw option key for invocation.
pub fn format_template(raw_name: &str, is_action: bool) -> String {
    if is_action {
        format!("{raw_name}:{{value}}")
    } else {
        format!("--{raw_name}={{value}}")
    }
}

/// Normalizes help text: escapes markup-significant characters, enforces a
/// trailing period, and converts backtick spans to inline-code markup.
pub fn normalize_help(description: Option<&str>) -> String {
    let Some(text) = description else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }

    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let with_period = if escaped.ends_with('.') {
        escaped
    } else {
        format!("{escaped}.")
    };
    CODE_SPAN_RE
        .replace_all(&with_period, "<c>$1</c>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_pascalizes_segments() {
        assert_eq!(display_name("username"), "Username");
        assert_eq!(display_name("app_identifier"), "AppIdentifier");
        assert_eq!(display_name("p12_password"), "P12Password");
    }

    #[test]
    fn test_display_name_collision_remaps() {
        assert_eq!(display_name("readonly"), "ReadOnlyFlag");
        assert_eq!(display_name("private"), "PrivateFlag");
        assert_eq!(display_name("params"), "ParamsValue");
        assert_eq!(display_name("base"), "BaseValue");
        // Non-colliding names pass through untouched.
        assert_eq!(display_name("base_url"), "BaseUrl");
    }

    #[test]
    fn test_format_template_tool_vs_action() {
        assert_eq!(format_template("username", false), "--username={value}");
        assert_eq!(format_template("message", true), "message:{value}");
    }

    #[test]
    fn value_kind_priority_order() {
        // 1. Comma-separated description wins, even without a type tag.
        let mut record = OptionRecord::new("devices");
        record.description = Some("Comma separated values of devices".into());
        assert_eq!(infer_value_kind(&record), ValueKind::StringList);

        // ...but an explicit Array tag suppresses the description check and
        // routes through the explicit-type branch instead.
        record.type_tag = Some("Array".into());
        assert_eq!(infer_value_kind(&record), ValueKind::StringList);

        // 2. is_string = false → boolean, even with an Array-free description.
        let mut record = OptionRecord::new("force");
        record.is_string = false;
        assert_eq!(infer_value_kind(&record), ValueKind::Boolean);

        // A boolean option whose description mentions comma separation is
        // still a list: the description check has higher priority.
        record.description = Some("comma-separated flags".into());
        assert_eq!(infer_value_kind(&record), ValueKind::StringList);

        // 3. Array tag alone → list.
        let mut record = OptionRecord::new("groups");
        record.type_tag = Some("Array".into());
        assert_eq!(infer_value_kind(&record), ValueKind::StringList);

        // 4. Default → string.
        assert_eq!(infer_value_kind(&OptionRecord::new("team")), ValueKind::String);
    }

    #[test]
    fn test_normalize_help_appends_period_and_escapes() {
        assert_eq!(
            normalize_help(Some("Your Apple ID Username")),
            "Your Apple ID Username."
        );
        assert_eq!(
            normalize_help(Some("set <key> & more")),
            "set &lt;key&gt; &amp; more."
        );
        assert_eq!(normalize_help(Some("Already ends.")), "Already ends.");
    }

    #[test]
    fn test_normalize_help_code_spans() {
        assert_eq!(
            normalize_help(Some("Use `gym` to build")),
            "Use <c>gym</c> to build."
        );
    }

    #[test]
    fn test_normalize_help_empty() {
        assert_eq!(normalize_help(None), "");
        assert_eq!(normalize_help(Some("")), "");
    }

    #[test]
    fn test_argument_from_record_full() {
        let mut record = OptionRecord::new("username");
        record.description = Some("Your Apple ID Username".into());
        record.optional = true;

        let arg = argument_from_record(&record);
        assert_eq!(arg.name, "Username");
        assert_eq!(arg.format, "--username={value}");
        assert_eq!(arg.help, "Your Apple ID Username.");
        assert_eq!(arg.value_kind, ValueKind::String);
        assert!(!arg.secret);
        assert!(arg.separator.is_none());
    }

    #[test]
    fn test_argument_from_record_list_gets_separator() {
        let mut record = OptionRecord::new("devices");
        record.type_tag = Some("Array".into());
        let arg = argument_from_record(&record);
        assert_eq!(arg.value_kind, ValueKind::StringList);
        assert_eq!(arg.separator, Some(','));
    }

    #[test]
    fn test_argument_from_record_secret_mirror() {
        let mut record = OptionRecord::new("password");
        record.sensitive = true;
        assert!(argument_from_record(&record).secret);
    }
}
