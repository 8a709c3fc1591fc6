//! Parser tests against realistic fastlane source fixtures.

use fastlane_meta_core::ValueKind;
use fastlane_meta_extract::parse_options_source;

const CERT: &str = include_str!("fixtures/cert.rb");
const MATCH: &str = include_str!("fixtures/match.rb");
const FRAMEIT: &str = include_str!("fixtures/frameit.rb");
const SLACK: &str = include_str!("fixtures/actions/slack.rb");

#[test]
fn cert_options_extract_in_declaration_order() {
    let parse = parse_options_source("cert", CERT, false);
    assert!(parse.warnings.is_empty(), "warnings: {:?}", parse.warnings);

    let names: Vec<&str> = parse.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Development", "Force", "Username", "TeamId", "OutputPath"]
    );
}

#[test]
fn cert_username_argument_shape() {
    let parse = parse_options_source("cert", CERT, false);
    let username = &parse.arguments[2];

    assert_eq!(username.name, "Username");
    assert_eq!(username.format, "--username={value}");
    assert_eq!(username.help, "Your Apple ID Username.");
    assert_eq!(username.value_kind, ValueKind::String);
    assert!(!username.secret);
    assert!(username.separator.is_none());
}

#[test]
fn cert_boolean_options_and_trailing_comment() {
    let parse = parse_options_source("cert", CERT, false);
    // `is_string: false` declarations become boolean arguments; the trailing
    // `# renew anyway` comment on the force option must not leak anywhere.
    assert_eq!(parse.arguments[0].value_kind, ValueKind::Boolean);
    assert_eq!(parse.arguments[1].value_kind, ValueKind::Boolean);
    assert_eq!(
        parse.arguments[1].help,
        "Create a certificate even if an existing one is valid."
    );
}

#[test]
fn cert_verify_block_body_does_not_leak_fields() {
    let parse = parse_options_source("cert", CERT, false);
    let team_id = &parse.arguments[3];
    assert_eq!(team_id.name, "TeamId");
    assert_eq!(
        team_id.help,
        "The ID of your Developer Portal team if you're in multiple teams."
    );
    assert_eq!(team_id.value_kind, ValueKind::String);
}

#[test]
fn match_readonly_is_remapped() {
    let parse = parse_options_source("match", MATCH, false);
    let names: Vec<&str> = parse.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "GitUrl",
            "Type",
            "ReadOnlyFlag",
            "AppIdentifier",
            "ShallowClone"
        ]
    );
}

#[test]
fn match_comma_separated_description_makes_a_list() {
    let parse = parse_options_source("match", MATCH, false);
    let app_identifier = &parse.arguments[3];
    assert_eq!(app_identifier.value_kind, ValueKind::StringList);
    assert_eq!(app_identifier.separator, Some(','));
    assert_eq!(
        app_identifier.help,
        "The bundle identifier(s) of your app (comma-separated)."
    );
}

#[test]
fn match_backtick_span_becomes_code_markup() {
    let parse = parse_options_source("match", MATCH, false);
    let shallow_clone = &parse.arguments[4];
    assert_eq!(shallow_clone.value_kind, ValueKind::Boolean);
    assert_eq!(
        shallow_clone.help,
        "Make a shallow clone of the repository (minimum history) using <c>git clone --depth 1</c>."
    );
}

#[test]
fn source_without_option_region_yields_nothing() {
    let parse = parse_options_source("frameit", FRAMEIT, false);
    assert!(parse.arguments.is_empty());
    assert!(parse.warnings.is_empty());
}

#[test]
fn action_source_uses_colon_format_and_secret() {
    let parse = parse_options_source("slack", SLACK, true);
    assert_eq!(parse.arguments.len(), 3);
    assert_eq!(parse.arguments[0].format, "message:{value}");

    let slack_url = &parse.arguments[1];
    assert_eq!(slack_url.name, "SlackUrl");
    assert!(slack_url.secret);

    // Parenthesized help text keeps its closing parenthesis; only trailing
    // Ruby punctuation outside the quotes is trimmed.
    let success = &parse.arguments[2];
    assert_eq!(success.help, "Was this build successful? (true/false).");
    assert_eq!(success.value_kind, ValueKind::Boolean);
}
