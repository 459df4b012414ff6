//! Plugin contract shared by every comparison check

use std::path::PathBuf;

/// Directories holding the built output of both revisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    /// Build output of the base revision
    pub before: PathBuf,
    /// Build output of the proposed change
    pub after: PathBuf,
}

impl SnapshotPaths {
    /// Pair up the two snapshot directories
    pub fn new(before: impl Into<PathBuf>, after: impl Into<PathBuf>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Text produced by one plugin run
///
/// Either log may be absent; the runner substitutes a notice for missing
/// output when reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOutput {
    /// Report printed to the console
    pub pretty_log: Option<String>,
    /// Report posted as Markdown in a review comment
    pub markdown_log: Option<String>,
}

/// A comparison check run against two snapshots
///
/// # Examples
///
/// ```
/// use pr_bot::plugin::{Plugin, PluginOutput, SnapshotPaths};
///
/// struct Noop;
///
/// impl Plugin for Noop {
///     fn name(&self) -> &str {
///         "Noop"
///     }
///
///     fn run(&self, _paths: &SnapshotPaths) -> anyhow::Result<PluginOutput> {
///         Ok(PluginOutput::default())
///     }
/// }
///
/// let output = Noop.run(&SnapshotPaths::new("before", "after")).unwrap();
/// assert!(output.pretty_log.is_none());
/// ```
pub trait Plugin: Send + Sync {
    /// Name used as the heading for this plugin's results
    fn name(&self) -> &str;

    /// Compare the two snapshots
    fn run(&self, paths: &SnapshotPaths) -> anyhow::Result<PluginOutput>;
}
