//! Compare command implementation
//!
//! Handles the `pr-bot compare` command which compares two already built
//! snapshot directories with the size plugin and prints the result

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::cicd::{ComparisonSummary, JsonOutput};
use crate::fmt::{format_byte_delta, format_bytes, CHART};
use crate::plugin::SnapshotPaths;
use crate::size::{
    GlobOptions, PathTransform, RewriteRule, SizePlugin, SizePluginOptions, SizeReport,
    PLUGIN_NAME,
};

/// Options for [`cmd_compare`]
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Files to compare, relative to each snapshot
    pub glob_pattern: String,
    /// Let wildcards match dotfiles
    pub dot: bool,
    /// Match case-insensitively
    pub ignore_case: bool,
    /// Path rewrites as `REGEX=REPLACEMENT`, applied in order
    pub transforms: Vec<String>,
    /// Print the Markdown report instead of the console report
    pub markdown: bool,
    /// Print machine-readable JSON
    pub json: bool,
}

/// Compare two snapshot directories and print the size report
///
/// # Examples
///
/// ```no_run
/// use pr_bot::cmd::compare::{cmd_compare, CompareOptions};
///
/// cmd_compare(
///     "base/dist",
///     "head/dist",
///     &CompareOptions {
///         glob_pattern: "**/*.js".to_string(),
///         ..CompareOptions::default()
///     },
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Either directory doesn't exist
/// - A transform is not `REGEX=REPLACEMENT` or its regex is invalid
/// - Scanning a snapshot fails
pub fn cmd_compare(before: &str, after: &str, options: &CompareOptions) -> Result<()> {
    print!("{}", render_compare(before, after, options)?);
    Ok(())
}

/// Produce the text [`cmd_compare`] prints
pub fn render_compare(before: &str, after: &str, options: &CompareOptions) -> Result<String> {
    let before_path = Path::new(before);
    let after_path = Path::new(after);

    if !before_path.is_dir() {
        anyhow::bail!("Base snapshot directory not found: {}", before);
    }
    if !after_path.is_dir() {
        anyhow::bail!("Snapshot directory not found: {}", after);
    }

    let plugin = SizePlugin::new(SizePluginOptions {
        glob_pattern: Some(options.glob_pattern.clone()),
        glob_options: GlobOptions {
            dot: options.dot,
            case_sensitive: !options.ignore_case,
        },
        path_transform: parse_transforms(&options.transforms)?,
    });

    let records = plugin.compare(&SnapshotPaths::new(before_path, after_path))?;

    if options.json {
        let output = JsonOutput::new(PLUGIN_NAME, records);
        return Ok(format!("{}\n", output.to_json()?));
    }

    let report = SizeReport::render(&records)?;
    if options.markdown {
        return Ok(format!("{}\n", report.markdown_log));
    }

    let summary = ComparisonSummary::from_records(&records);
    Ok(format!(
        "{} {}\n{}\n{}\n",
        CHART,
        style("Snapshot Size Comparison").bold(),
        report.pretty_log,
        summary_line(&summary)
    ))
}

fn summary_line(summary: &ComparisonSummary) -> String {
    let delta = summary.total_after_bytes as i64 - summary.total_before_bytes as i64;
    format!(
        "Total: {} > {} ({}), {} changed, {} new, {} unchanged",
        format_bytes(summary.total_before_bytes),
        format_bytes(summary.total_after_bytes),
        format_byte_delta(delta),
        summary.changed,
        summary.new,
        summary.unchanged
    )
}

/// Parse `REGEX=REPLACEMENT` arguments into a combined transform.
///
/// The split happens at the last `=` so the regex may contain `=`.
fn parse_transforms(transforms: &[String]) -> Result<Option<PathTransform>> {
    if transforms.is_empty() {
        return Ok(None);
    }

    let rules = transforms
        .iter()
        .map(|transform| {
            let (pattern, replacement) = transform.rsplit_once('=').with_context(|| {
                format!(
                    "Invalid transform '{}': expected REGEX=REPLACEMENT",
                    transform
                )
            })?;
            RewriteRule::new(pattern, replacement)
                .with_context(|| format!("Invalid transform regex '{}'", pattern))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(PathTransform::from_rules(rules)))
}
