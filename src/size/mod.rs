//! File size comparison between two build snapshots
//!
//! Pipeline: scan both snapshots in parallel ([`FileInventory`]), join the
//! inventories ([`diff`]), then render console and Markdown reports
//! ([`SizeReport`]).

pub mod diff;
pub mod error;
pub mod inventory;
pub mod report;
pub mod units;

pub use diff::{diff, ComparisonRecord};
pub use error::SizeError;
pub use inventory::{
    FileInventory, FileRecord, GlobOptions, Inventory, InventoryOptions, PathTransform,
    RewriteRule,
};
pub use report::SizeReport;
pub use units::{convert_size, ConvertedSize, SizeUnit};

use log::debug;

use crate::plugin::{Plugin, PluginOutput, SnapshotPaths};

/// Name the size plugin reports under
pub const PLUGIN_NAME: &str = "PR-Bot Size Plugin";

/// Options for [`SizePlugin`]
#[derive(Debug, Clone, Default)]
pub struct SizePluginOptions {
    /// Files to compare, relative to each snapshot root. Required.
    pub glob_pattern: Option<String>,
    /// Matching flags
    pub glob_options: GlobOptions,
    /// Optional rewrite so renamed-but-equivalent files share a key
    pub path_transform: Option<PathTransform>,
}

/// Reports per-file size changes between the two snapshots
#[derive(Debug, Clone)]
pub struct SizePlugin {
    options: SizePluginOptions,
}

impl SizePlugin {
    /// Create the plugin; the glob pattern is checked when it runs
    pub fn new(options: SizePluginOptions) -> Self {
        Self { options }
    }

    /// Scan both snapshots and compare them file by file.
    ///
    /// Both scans run concurrently; the comparison only happens when both
    /// succeed. A "before" failure is reported in preference to an "after"
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::MissingGlobPattern`] before touching the
    /// filesystem when no pattern is configured, or the first scan error.
    pub fn compare(&self, paths: &SnapshotPaths) -> Result<Vec<ComparisonRecord>, SizeError> {
        let glob_pattern = self
            .options
            .glob_pattern
            .as_deref()
            .filter(|pattern| !pattern.trim().is_empty())
            .ok_or_else(|| SizeError::MissingGlobPattern {
                plugin: PLUGIN_NAME.to_string(),
            })?;

        let inventory = FileInventory::new(InventoryOptions {
            glob_pattern: glob_pattern.to_string(),
            glob_options: self.options.glob_options,
            path_transform: self.options.path_transform.clone(),
        });

        let (before, after) = rayon::join(
            || inventory.build(&paths.before),
            || inventory.build(&paths.after),
        );
        let (before, after) = (before?, after?);
        debug!(
            "Comparing {} files before with {} files after",
            before.len(),
            after.len()
        );

        Ok(diff(&before, &after))
    }
}

impl Plugin for SizePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn run(&self, paths: &SnapshotPaths) -> anyhow::Result<PluginOutput> {
        let records = self.compare(paths)?;
        let report = SizeReport::render(&records)?;

        Ok(PluginOutput {
            pretty_log: Some(report.pretty_log),
            markdown_log: Some(report.markdown_log),
        })
    }
}
