//! Byte count scaling for report display
//!
//! Sizes use decimal (1000-based) tiers and stop at megabytes.

use std::fmt;

/// Factor between two consecutive unit tiers
const TIER_FACTOR: f64 = 1000.0;

/// Display unit for a file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    /// Bytes, printed without decimals
    Byte,
    /// Kilobytes (1000 bytes)
    Kilobyte,
    /// Megabytes (1000 kilobytes), the largest tier
    Megabyte,
}

impl SizeUnit {
    /// Label printed after the number
    pub fn label(self) -> &'static str {
        match self {
            Self::Byte => "B",
            Self::Kilobyte => "KB",
            Self::Megabyte => "MB",
        }
    }

    /// Number of decimal places shown for this unit
    pub fn decimal_places(self) -> usize {
        match self {
            Self::Byte => 0,
            Self::Kilobyte | Self::Megabyte => 2,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Byte => Some(Self::Kilobyte),
            Self::Kilobyte => Some(Self::Megabyte),
            Self::Megabyte => None,
        }
    }
}

/// A size scaled into its display unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertedSize {
    /// Magnitude in `unit`
    pub size: f64,
    /// Unit the magnitude is expressed in
    pub unit: SizeUnit,
}

impl fmt::Display for ConvertedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.*} {}",
            self.unit.decimal_places(),
            self.size,
            self.unit.label()
        )
    }
}

/// Scale a byte count into B, KB or MB.
///
/// Returns `None` for values that are not finite numbers, which marks a size
/// as not applicable.
///
/// # Examples
///
/// ```
/// use pr_bot::size::units::{convert_size, SizeUnit};
///
/// let converted = convert_size(1500.0).unwrap();
/// assert_eq!(converted.size, 1.5);
/// assert_eq!(converted.unit, SizeUnit::Kilobyte);
/// assert_eq!(converted.to_string(), "1.50 KB");
///
/// assert!(convert_size(f64::NAN).is_none());
/// ```
pub fn convert_size(size_in_bytes: f64) -> Option<ConvertedSize> {
    if !size_in_bytes.is_finite() {
        return None;
    }

    let mut size = size_in_bytes;
    let mut unit = SizeUnit::Byte;
    while size.abs() >= TIER_FACTOR {
        let Some(next) = unit.next() else { break };
        size /= TIER_FACTOR;
        unit = next;
    }

    Some(ConvertedSize { size, unit })
}

/// Scale an optional byte count; absent sizes stay absent.
pub fn convert_optional(size_in_bytes: Option<u64>) -> Option<ConvertedSize> {
    size_in_bytes.and_then(|bytes| convert_size(bytes as f64))
}
