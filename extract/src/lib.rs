//! Extraction pipeline for fastlane option metadata.
//!
//! Turns the irregular Ruby `available_options` declaration blocks found in
//! fastlane tool and action sources into normalized, typed argument
//! descriptors, and aggregates them into a single metadata document for a
//! downstream CLI-wrapper generator.
//!
//! The pipeline stages are deliberately line-oriented and heuristic: the
//! inputs are hand-written Ruby with wildly inconsistent formatting, so each
//! stage narrows the text (source → option region → declaration blocks →
//! field maps → typed records → argument specs) and drops what it cannot
//! recognize, warning per option rather than failing per tool.
//!
//! Entry points:
//! - [`parse_options_source`] parses one source text;
//! - [`pipeline::run_pipeline`] runs the full multi-tool fan-out and
//!   document synthesis.
//!
//! # Examples
//!
//! ```
//! use fastlane_meta_extract::parse_options_source;
//!
//! let source = r#"
//! def self.available_options
//!   [
//!     FastlaneCore::ConfigItem.new(key: :username,
//!                                  env_name: "CERT_USERNAME",
//!                                  description: "Your Apple ID Username",
//!                                  optional: true)
//!   ]
//! end
//! "#;
//!
//! let parse = parse_options_source("cert", source, false);
//! assert_eq!(parse.arguments.len(), 1);
//! assert_eq!(parse.arguments[0].name, "Username");
//! assert_eq!(parse.arguments[0].format, "--username={value}");
//! assert!(parse.warnings.is_empty());
//! ```

pub mod blocks;
pub mod decode;
pub mod fields;
pub mod infer;
pub mod pipeline;
pub mod region;
pub mod source;
pub mod synth;
pub mod writer;

use tracing::warn;

use fastlane_meta_core::ArgumentSpec;

use crate::decode::DecodeOutcome;

/// Result of parsing one tool or action source text.
#[derive(Debug, Clone, Default)]
pub struct ToolParse {
    /// Generated arguments, in source declaration order.
    pub arguments: Vec<ArgumentSpec>,
    /// One warning per dropped option block.
    pub warnings: Vec<String>,
}

/// Parses one source text into argument descriptors.
///
/// A source without an option region (or with an empty one) yields an empty
/// parse, not an error. Individual blocks that fail to decode are dropped
/// with a warning; `tool` names the source in those warnings. `is_action`
/// selects the `name:{value}` invocation format instead of
/// `--name={value}`.
pub fn parse_options_source(tool: &str, source: &str, is_action: bool) -> ToolParse {
    let region = region::extract_option_region(source);
    if region.is_empty() {
        return ToolParse::default();
    }

    let mut parse = ToolParse::default();
    for block in blocks::split_option_blocks(&region) {
        let Some(fields) = fields::parse_fields(&block) else {
            continue;
        };
        let block_text = block.join("\n");
        match decode::decode_option(&fields, tool, is_action, &block_text) {
            DecodeOutcome::Decoded(record) => {
                parse.arguments.push(infer::argument_from_record(&record));
            }
            DecodeOutcome::Invalid(diagnostic) => {
                warn!(
                    source = %diagnostic.source,
                    excerpt = %diagnostic.excerpt,
                    "dropping option block: {}",
                    diagnostic.reason
                );
                parse.warnings.push(diagnostic.to_string());
            }
        }
    }
    parse
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastlane_meta_core::ValueKind;

    #[test]
    fn test_source_without_options_region_is_empty() {
        let parse = parse_options_source("frameit", "module Frameit\nend\n", false);
        assert!(parse.arguments.is_empty());
        assert!(parse.warnings.is_empty());
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let source = r#"
def self.available_options
  [
    FastlaneCore::ConfigItem.new(key: :username,
                                 optional: true),
    FastlaneCore::ConfigItem.new(key: :team_id,
                                 optional: true),
    FastlaneCore::ConfigItem.new(key: :force,
                                 is_string: false)
  ]
end
"#;
        let parse = parse_options_source("cert", source, false);
        let names: Vec<&str> = parse
            .arguments
            .iter()
            .map(|arg| arg.name.as_str())
            .collect();
        assert_eq!(names, vec!["Username", "TeamId", "Force"]);
        assert_eq!(parse.arguments[2].value_kind, ValueKind::Boolean);
    }

    #[test]
    fn test_undecodable_block_warns_and_continues() {
        let source = r#"
def self.available_options
  [
    FastlaneCore::ConfigItem.new(key: :username,
                                 optional: "yes"),
    FastlaneCore::ConfigItem.new(key: :team_id,
                                 optional: true)
  ]
end
"#;
        let parse = parse_options_source("pilot", source, false);
        assert_eq!(parse.arguments.len(), 1);
        assert_eq!(parse.arguments[0].name, "TeamId");
        assert_eq!(parse.warnings.len(), 1);
        assert!(parse.warnings[0].starts_with("pilot:"));
    }

    #[test]
    fn test_action_source_uses_action_format() {
        let source = r#"
def self.available_options
  [
    FastlaneCore::ConfigItem.new(key: :message,
                                 description: "The message",
                                 optional: true)
  ]
end
"#;
        let parse = parse_options_source("slack", source, true);
        assert_eq!(parse.arguments[0].format, "message:{value}");
    }
}
