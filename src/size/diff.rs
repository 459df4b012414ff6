//! Joins two snapshot inventories into per-file comparison records

use serde::Serialize;

use super::inventory::Inventory;

/// Result of comparing one file of the "after" snapshot with its baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    /// Relative path shared by both snapshots
    pub relative_path: String,
    /// Size in the "after" snapshot
    pub size_in_bytes: u64,
    /// Gzip size in the "after" snapshot
    pub gzip_size_in_bytes: u64,
    /// True when the path does not exist in the "before" snapshot
    pub is_new_file: bool,
    /// Size in the "before" snapshot
    pub previous_size: Option<u64>,
    /// `after - before`; absent for new files
    pub size_difference_in_bytes: Option<i64>,
    /// `after / before - 1`
    ///
    /// NaN for new files and for files empty in both snapshots, `+inf` when
    /// an empty file gained content. Serialized as `null` when not finite.
    pub size_difference_percent: f64,
}

impl ComparisonRecord {
    /// Existing file whose size changed between the snapshots
    pub fn is_changed(&self) -> bool {
        !self.is_new_file && self.size_difference_in_bytes != Some(0)
    }
}

/// Compare every file in `after` against `before`, sorted by path.
///
/// Files only present in `before` are not reported.
///
/// # Examples
///
/// ```
/// use pr_bot::size::{diff, FileRecord, Inventory};
///
/// let record = |path: &str, size| FileRecord {
///     relative_path: path.to_string(),
///     size_in_bytes: size,
///     gzip_size_in_bytes: size,
/// };
/// let before = Inventory::from([("a.js".to_string(), record("a.js", 100))]);
/// let after = Inventory::from([("a.js".to_string(), record("a.js", 150))]);
///
/// let records = diff(&before, &after);
/// assert_eq!(records[0].size_difference_in_bytes, Some(50));
/// assert_eq!(records[0].size_difference_percent, 0.5);
/// ```
pub fn diff(before: &Inventory, after: &Inventory) -> Vec<ComparisonRecord> {
    after
        .values()
        .map(|current| {
            let base = ComparisonRecord {
                relative_path: current.relative_path.clone(),
                size_in_bytes: current.size_in_bytes,
                gzip_size_in_bytes: current.gzip_size_in_bytes,
                is_new_file: true,
                previous_size: None,
                size_difference_in_bytes: None,
                size_difference_percent: f64::NAN,
            };

            match before.get(&current.relative_path) {
                None => base,
                Some(previous) => ComparisonRecord {
                    is_new_file: false,
                    previous_size: Some(previous.size_in_bytes),
                    size_difference_in_bytes: Some(
                        current.size_in_bytes as i64 - previous.size_in_bytes as i64,
                    ),
                    size_difference_percent: current.size_in_bytes as f64
                        / previous.size_in_bytes as f64
                        - 1.0,
                    ..base
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::inventory::FileRecord;

    fn inventory(files: &[(&str, u64)]) -> Inventory {
        files
            .iter()
            .map(|(path, size)| {
                (
                    path.to_string(),
                    FileRecord {
                        relative_path: path.to_string(),
                        size_in_bytes: *size,
                        gzip_size_in_bytes: size / 2,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_diff_emits_one_record_per_after_key() {
        let before = inventory(&[("a", 1), ("removed", 5)]);
        let after = inventory(&[("b", 2), ("a", 3)]);

        let records = diff(&before, &after);

        let paths: Vec<_> = records.iter().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn test_diff_marks_new_files() {
        let records = diff(&inventory(&[]), &inventory(&[("new.txt", 21)]));

        let record = &records[0];
        assert!(record.is_new_file);
        assert_eq!(record.previous_size, None);
        assert_eq!(record.size_difference_in_bytes, None);
        assert!(record.size_difference_percent.is_nan());
        assert!(!record.is_changed());
    }

    #[test]
    fn test_diff_computes_deltas_for_existing_files() {
        let records = diff(&inventory(&[("d.txt", 29)]), &inventory(&[("d.txt", 50)]));

        let record = &records[0];
        assert!(!record.is_new_file);
        assert_eq!(record.previous_size, Some(29));
        assert_eq!(record.size_difference_in_bytes, Some(21));
        assert!((record.size_difference_percent - 0.7241).abs() < 1e-4);
        assert!(record.is_changed());
    }

    #[test]
    fn test_diff_growth_from_empty_is_infinite() {
        let records = diff(&inventory(&[("c.txt", 0)]), &inventory(&[("c.txt", 38)]));

        assert_eq!(records[0].size_difference_percent, f64::INFINITY);
    }

    #[test]
    fn test_diff_shrink_to_empty_is_minus_one() {
        let records = diff(&inventory(&[("a.txt", 45)]), &inventory(&[("a.txt", 0)]));

        assert_eq!(records[0].size_difference_in_bytes, Some(-45));
        assert_eq!(records[0].size_difference_percent, -1.0);
    }

    #[test]
    fn test_diff_against_itself_has_no_changes() {
        let snapshot = inventory(&[("a", 10), ("empty", 0), ("b", 2000)]);

        let records = diff(&snapshot, &snapshot);

        assert!(records.iter().all(|r| r.size_difference_in_bytes == Some(0)));
        assert!(records.iter().all(|r| !r.is_changed()));
        assert_eq!(records[0].size_difference_percent, 0.0);
        assert!(records[2].size_difference_percent.is_nan());
    }

    #[test]
    fn test_diff_does_not_mutate_inputs() {
        let before = inventory(&[("a", 1)]);
        let after = inventory(&[("a", 2)]);
        let before_copy = before.clone();
        let after_copy = after.clone();

        let _ = diff(&before, &after);

        assert_eq!(before, before_copy);
        assert_eq!(after, after_copy);
    }
}
