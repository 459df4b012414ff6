//! Helpers for asserting on rendered reports
//!
//! Reports pad their columns, so tests look rows up by file name instead of
//! comparing whole lines.

#![allow(dead_code)]

/// Find the console table line for `path`
///
/// ANSI codes are stripped first.
pub fn console_row(report: &str, path: &str) -> Option<String> {
    console::strip_ansi_codes(report)
        .lines()
        .find(|line| line.split_whitespace().next() == Some(path))
        .map(str::to_string)
}

/// Split a Markdown row into trimmed cells
pub fn markdown_cells(row: &str) -> Vec<String> {
    row.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Body rows of the Markdown table following `heading`
///
/// The heading row and separator row are skipped. An empty result means the
/// section holds a placeholder message instead of a table.
pub fn markdown_section_rows(markdown: &str, heading: &str) -> Vec<Vec<String>> {
    let Some(start) = markdown.find(heading) else {
        return Vec::new();
    };

    let section = &markdown[start + heading.len()..];
    let section = section.find("\n####").map_or(section, |end| &section[..end]);

    section
        .lines()
        .skip_while(|line| !line.starts_with('|'))
        .take_while(|line| line.starts_with('|'))
        .skip(2)
        .map(markdown_cells)
        .collect()
}

/// Assert that two floating-point values are approximately equal
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual,
        expected,
        diff,
        epsilon
    );
}
