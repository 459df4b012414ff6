//! JSON output formatting for CI/CD integration

use serde::Serialize;

use crate::size::ComparisonRecord;

/// JSON document describing one size comparison
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Plugin that produced the comparison
    pub plugin: String,
    /// One entry per file of the "after" snapshot
    pub files: Vec<ComparisonRecord>,
    /// Aggregate counts and totals
    pub summary: ComparisonSummary,
}

/// Aggregate view over comparison records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    /// Existing files whose size changed
    pub changed: usize,
    /// Files only present after the change
    pub new: usize,
    /// Existing files with identical size
    pub unchanged: usize,
    /// Total size of the compared files before the change (new files excluded)
    pub total_before_bytes: u64,
    /// Total size of all files after the change
    pub total_after_bytes: u64,
}

impl ComparisonSummary {
    /// Summarise a set of records
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                if record.is_new_file {
                    summary.new += 1;
                } else if record.is_changed() {
                    summary.changed += 1;
                } else {
                    summary.unchanged += 1;
                }
                summary.total_before_bytes += record.previous_size.unwrap_or(0);
                summary.total_after_bytes += record.size_in_bytes;
                summary
            })
    }
}

impl JsonOutput {
    /// Create JSON output for a comparison
    pub fn new(plugin: impl Into<String>, files: Vec<ComparisonRecord>) -> Self {
        let summary = ComparisonSummary::from_records(&files);
        Self {
            plugin: plugin.into(),
            files,
            summary,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }
}
