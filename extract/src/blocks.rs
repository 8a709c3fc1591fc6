//! Partitioning an option region into per-declaration blocks.

use tracing::debug;

/// Constructor marker that begins a new option declaration.
pub const CONFIG_ITEM_MARKER: &str = "FastlaneCore::ConfigItem.new";

/// Splits region lines into one raw block per `ConfigItem` declaration.
///
/// Blank lines and comment lines are dropped. A line whose trimmed form
/// starts with the constructor marker closes any open block and opens a new
/// one; every surviving line (the marker line included) is appended to the
/// open block. The final block is pushed unconditionally — empty blocks are
/// filtered later by the field parser's "no fields parsed" rule.
pub fn split_option_blocks(region: &[String]) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in region {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with(CONFIG_ITEM_MARKER) {
            if in_block {
                blocks.push(std::mem::take(&mut current));
            }
            in_block = true;
        }
        current.push(line.clone());
    }
    blocks.push(current);

    debug!(blocks = blocks.len(), "split option region into blocks");
    blocks
}
