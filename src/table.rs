//! Column-aligned tables for console and Markdown output
//!
//! Cell widths are measured on visible characters, so cells that carry ANSI
//! styling line up the same way they would without it.

use console::{measure_text_width, pad_str, Alignment};
use thiserror::Error;

/// Separator between columns in console tables
const LOG_COLUMN_SEPARATOR: &str = "  ";

/// Table rendering errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A row does not have the same number of cells as the table header
    #[error("table row {row} has {found} cells, expected {expected}")]
    RowShape {
        /// Zero-based index of the offending row
        row: usize,
        /// Number of cells every row must have
        expected: usize,
        /// Number of cells found in the row
        found: usize,
    },
}

/// Pad every cell to its column's widest cell and join the cells of each row.
///
/// The column count is taken from the first row. Each row is trimmed, so the
/// last column never carries trailing padding.
///
/// # Examples
///
/// ```
/// use pr_bot::table::pad_columns;
///
/// let rows = vec![
///     vec!["a.txt".to_string(), "45 B".to_string()],
///     vec!["longer.txt".to_string(), "0 B".to_string()],
/// ];
/// let lines = pad_columns(&rows).unwrap();
/// assert_eq!(lines[0], "a.txt       45 B");
/// assert_eq!(lines[1], "longer.txt  0 B");
/// ```
pub fn pad_columns(rows: &[Vec<String>]) -> Result<Vec<String>, TableError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let widths = column_widths(rows, first.len())?;

    Ok(rows
        .iter()
        .map(|row| {
            pad_row(row, &widths)
                .join(LOG_COLUMN_SEPARATOR)
                .trim()
                .to_string()
        })
        .collect())
}

/// Render rows as a newline separated, column aligned console table.
///
/// Returns an empty string when there are no rows.
pub fn log_table(rows: &[Vec<String>]) -> Result<String, TableError> {
    Ok(pad_columns(rows)?.join("\n"))
}

/// Render a pipe-delimited Markdown table.
///
/// Returns an empty string when there are no rows. Headings are written as
/// given; only body cells are padded.
///
/// # Examples
///
/// ```
/// use pr_bot::table::markdown_table;
///
/// let table = markdown_table(&["File", "Size"], &[vec!["a.txt".into(), "45 B".into()]]).unwrap();
/// assert_eq!(table, "| File | Size |\n| --- | --- |\n| a.txt | 45 B |");
/// ```
pub fn markdown_table(headings: &[&str], rows: &[Vec<String>]) -> Result<String, TableError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let widths = column_widths(rows, headings.len())?;

    let heading_row = format!("| {} |", headings.join(" | "));
    let separator_row = format!("|{}", " --- |".repeat(headings.len()));

    let body = rows
        .iter()
        .map(|row| format!("| {} |", pad_row(row, &widths).join(" | ").trim()))
        .collect::<Vec<_>>()
        .join("\n");

    Ok([heading_row, separator_row, body].join("\n"))
}

fn column_widths(rows: &[Vec<String>], columns: usize) -> Result<Vec<usize>, TableError> {
    let mut widths = vec![0; columns];

    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(TableError::RowShape {
                row: index,
                expected: columns,
                found: row.len(),
            });
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    Ok(widths)
}

fn pad_row(row: &[String], widths: &[usize]) -> Vec<String> {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
        .collect()
}
