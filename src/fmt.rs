//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Magnifier emoji for analysis output
pub const MAGNIFIER: Emoji = Emoji("🔍", ">>");

/// Warning emoji for excluded bundles
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Sparkles emoji for a clean result
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use bundle_dedupe::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
