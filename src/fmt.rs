//! Shared console symbols and formatting helpers

use console::Emoji;

use crate::size::convert_size;

/// Hammer emoji for build operations
pub const HAMMER: Emoji = Emoji("🔨", ">");

/// Chart emoji for size reports
pub const CHART: Emoji = Emoji("📊", "~");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Speech balloon emoji for posted comments
pub const COMMENT: Emoji = Emoji("💬", ">");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Format a byte total with the size units used in reports
///
/// # Examples
///
/// ```
/// use pr_bot::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1_500), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    convert_size(bytes as f64)
        .map(|size| size.to_string())
        .unwrap_or_default()
}

/// Format a signed byte difference, always with a sign
///
/// # Examples
///
/// ```
/// use pr_bot::fmt::format_byte_delta;
///
/// assert_eq!(format_byte_delta(-2_000), "-2.00 KB");
/// assert_eq!(format_byte_delta(12), "+12 B");
/// assert_eq!(format_byte_delta(0), "0 B");
/// ```
pub fn format_byte_delta(delta: i64) -> String {
    let magnitude = format_bytes(delta.unsigned_abs());
    match delta.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}
