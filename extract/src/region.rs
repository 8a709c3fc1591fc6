//! Option-region extraction from fastlane source texts.
//!
//! A fastlane `options.rb` (or action file) declares its options inside an
//! array literal returned by `def self.available_options`. This module
//! isolates the lines of that array with a small explicit state machine, so
//! the region boundaries are testable independently of the block and field
//! parsers.

use tracing::debug;

/// Method signature that opens the option declaration section.
pub const OPTIONS_METHOD_MARKER: &str = "def self.available_options";

/// Scanner state while walking the source lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Ignoring everything until the method marker is seen.
    AwaitingMarker,
    /// Marker seen; ignoring until a line opens the option array.
    AwaitingOpenBracket,
    /// Inside the option array; yielding lines.
    InRegion,
    /// Closing bracket seen; nothing further is yielded.
    Done,
}

/// Extracts the lines lying strictly between the `available_options` marker
/// and the closing bracket of the option array.
///
/// Returns an empty region when the marker is never found; downstream stages
/// treat that as "no options", not as an error.
///
/// # Examples
///
/// ```
/// use fastlane_meta_extract::region::extract_option_region;
///
/// let source = "\
/// module Cert
///   def self.available_options
///     [
///       FastlaneCore::ConfigItem.new(key: :username,
///                                    optional: true)
///     ]
///   end
/// end
/// ";
/// let region = extract_option_region(source);
/// assert_eq!(region.len(), 2);
/// assert!(region[0].contains("ConfigItem"));
/// ```
pub fn extract_option_region(source: &str) -> Vec<String> {
    let mut state = ScanState::AwaitingMarker;
    let mut region = Vec::new();

    for line in source.lines() {
        match state {
            ScanState::AwaitingMarker => {
                if line.contains(OPTIONS_METHOD_MARKER) {
                    state = ScanState::AwaitingOpenBracket;
                }
            }
            ScanState::AwaitingOpenBracket => {
                let trimmed = line.trim();
                if trimmed.starts_with('[') || trimmed.ends_with('[') {
                    state = ScanState::InRegion;
                }
            }
            ScanState::InRegion => {
                // The closing line itself is not part of the region.
                if line.trim().starts_with(']') {
                    state = ScanState::Done;
                } else {
                    region.push(line.to_string());
                }
            }
            ScanState::Done => break,
        }
    }

    debug!(lines = region.len(), "extracted option region");
    region
}
