//! Console and Markdown renderings of size comparison records

use console::style;

use super::diff::ComparisonRecord;
use super::error::SizeError;
use super::units::convert_optional;
use crate::table::{log_table, markdown_table};

/// Shown in place of the changed-files table when nothing changed
pub const NO_CHANGES_MESSAGE: &str = "No file sizes have changed.";

/// Shown in place of the new-files table when nothing was added
pub const NO_NEW_FILES_MESSAGE: &str = "No new files have been added.";

/// Marks files that shrank by more than 10%
pub const SHRANK_EMOJI: &str = "🎉";

/// Marks files that grew by more than 10%
pub const GREW_EMOJI: &str = "☠️";

/// Relative change above which a file is flagged in the Markdown report
const FLAG_THRESHOLD: f64 = 0.1;

const CHANGED_HEADINGS: [&str; 6] = ["File", "Before", "After", "Change", "GZipped", ""];
const NEW_HEADINGS: [&str; 3] = ["File", "Size", "GZipped"];

/// Both renderings of one size comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    /// Console report
    pub pretty_log: String,
    /// Markdown report for review comments
    pub markdown_log: String,
}

impl SizeReport {
    /// Render both reports from the same records
    pub fn render(records: &[ComparisonRecord]) -> Result<Self, SizeError> {
        Ok(Self {
            pretty_log: render_plain_text(records)?,
            markdown_log: render_markdown(records)?,
        })
    }
}

/// Format a relative change (`0.5` = 50%) with sign and no decimals.
///
/// Returns `None` for NaN, which has no meaningful percentage.
///
/// # Examples
///
/// ```
/// use pr_bot::size::report::format_percent;
///
/// assert_eq!(format_percent(0.7241).as_deref(), Some("+72%"));
/// assert_eq!(format_percent(-1.0).as_deref(), Some("-100%"));
/// assert_eq!(format_percent(0.0).as_deref(), Some("0%"));
/// assert_eq!(format_percent(f64::INFINITY).as_deref(), Some("+Infinity%"));
/// assert_eq!(format_percent(f64::NAN), None);
/// ```
pub fn format_percent(relative_change: f64) -> Option<String> {
    if relative_change.is_nan() {
        return None;
    }

    let prefix = if relative_change > 0.0 { "+" } else { "" };
    let number = if relative_change.is_infinite() {
        if relative_change > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        format!("{:.0}", relative_change * 100.0)
    };

    Some(format!("{prefix}{number}%"))
}

fn display_size(bytes: u64) -> String {
    convert_optional(Some(bytes))
        .map(|size| size.to_string())
        .unwrap_or_default()
}

fn display_optional_size(bytes: Option<u64>) -> String {
    convert_optional(bytes)
        .map(|size| size.to_string())
        .unwrap_or_default()
}

fn partition(records: &[ComparisonRecord]) -> (Vec<&ComparisonRecord>, Vec<&ComparisonRecord>) {
    let changed = records.iter().filter(|r| r.is_changed()).collect();
    let new = records.iter().filter(|r| r.is_new_file).collect();
    (changed, new)
}

fn styled_percent(record: &ComparisonRecord) -> String {
    let percent = record.size_difference_percent;
    let text = format_percent(percent).unwrap_or_default();
    if percent >= FLAG_THRESHOLD {
        style(text).red().to_string()
    } else if percent <= -FLAG_THRESHOLD {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

fn titled_section(title: &str, body: &str) -> String {
    [title, &"-".repeat(title.len()), body].join("\n")
}

/// Render the console report: changed files, then new files.
///
/// Unchanged files are left out. Colours are only emitted when the
/// terminal supports them.
pub fn render_plain_text(records: &[ComparisonRecord]) -> Result<String, SizeError> {
    let (changed, new) = partition(records);

    let changed_rows: Vec<Vec<String>> = changed
        .iter()
        .map(|record| {
            vec![
                style(&record.relative_path).yellow().to_string(),
                format!(
                    "{} {} {}",
                    style(display_optional_size(record.previous_size)).dim(),
                    style(">").dim(),
                    style(display_size(record.size_in_bytes)).blue()
                ),
                styled_percent(record),
            ]
        })
        .collect();

    let new_rows: Vec<Vec<String>> = new
        .iter()
        .map(|record| {
            vec![
                style(&record.relative_path).yellow().to_string(),
                style(display_size(record.size_in_bytes)).blue().to_string(),
            ]
        })
        .collect();

    let changed_table = if changed_rows.is_empty() {
        NO_CHANGES_MESSAGE.to_string()
    } else {
        log_table(&changed_rows)?
    };
    let new_table = if new_rows.is_empty() {
        NO_NEW_FILES_MESSAGE.to_string()
    } else {
        log_table(&new_rows)?
    };

    Ok(format!(
        "\n{}\n\n{}\n",
        titled_section("Changed File Sizes", &changed_table),
        titled_section("New Files", &new_table)
    ))
}

fn markdown_comparison_rows(records: &[&ComparisonRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            let percent = record.size_difference_percent;
            let emoji = if percent > FLAG_THRESHOLD {
                GREW_EMOJI
            } else if percent < -FLAG_THRESHOLD {
                SHRANK_EMOJI
            } else {
                ""
            };

            vec![
                record.relative_path.clone(),
                display_optional_size(record.previous_size),
                display_size(record.size_in_bytes),
                format_percent(percent).unwrap_or_default(),
                display_size(record.gzip_size_in_bytes),
                emoji.to_string(),
            ]
        })
        .collect()
}

/// Render the Markdown report used for review comments.
///
/// The "All File Sizes" table has one row per record and is collapsed in a
/// `<details>` block.
pub fn render_markdown(records: &[ComparisonRecord]) -> Result<String, SizeError> {
    let (changed, new) = partition(records);
    let all: Vec<&ComparisonRecord> = records.iter().collect();

    let new_rows: Vec<Vec<String>> = new
        .iter()
        .map(|record| {
            vec![
                record.relative_path.clone(),
                display_size(record.size_in_bytes),
                display_size(record.gzip_size_in_bytes),
            ]
        })
        .collect();

    let mut changed_table =
        markdown_table(&CHANGED_HEADINGS, &markdown_comparison_rows(&changed))?;
    let mut new_table = markdown_table(&NEW_HEADINGS, &new_rows)?;
    let full_table = markdown_table(&CHANGED_HEADINGS, &markdown_comparison_rows(&all))?;

    if changed_table.is_empty() {
        changed_table = NO_CHANGES_MESSAGE.to_string();
    }
    if new_table.is_empty() {
        new_table = NO_NEW_FILES_MESSAGE.to_string();
    }

    Ok(format!(
        "#### Changed File Sizes\n\
         \n\
         {changed_table}\n\
         \n\
         #### New Files\n\
         \n\
         {new_table}\n\
         \n\
         #### All File Sizes\n\
         \n\
         <details>\n\
         <summary>View Table</summary>\n\
         \n\
         {full_table}\n\
         \n\
         </details>"
    ))
}
