//! Plugin orchestration and reporting
//!
//! [`run_plugins`] runs every plugin against the same pair of snapshots and
//! stops at the first failure. [`BotRunner::report`] then either posts the
//! combined Markdown to a review comment or prints the console logs.

pub mod sink;

pub use sink::{CommentFileSink, MemorySink, ReportSink};

use std::io::Write;

use log::{debug, info, warn};

use crate::cicd::{CiContext, RepoDetails};
use crate::config::ConfigFile;
use crate::error::PrBotError;
use crate::plugin::{Plugin, PluginOutput, SnapshotPaths};

/// Heading used when printing console output
pub const DEBUG_HEADING: &str = "Results from plugins";

/// Shown in the comment for plugins without Markdown output
pub const NO_MARKDOWN_MESSAGE: &str = "This plugin provided no markdown output.";

/// Shown on the console for plugins without a console log
pub const NO_LOG_MESSAGE: &str = "This plugin provided no log output.";

/// Output of one plugin, tagged with its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginResult {
    /// Plugin name
    pub name: String,
    /// What the plugin produced
    pub output: PluginOutput,
}

/// Run `plugins` in order against `paths`.
///
/// Results keep the plugin order. The first plugin that has no name or
/// returns an error aborts the run and no results are returned.
///
/// # Errors
///
/// [`PrBotError::UnnamedPlugin`] for a blank name, or
/// [`PrBotError::PluginFailed`] wrapping the plugin's own error.
pub fn run_plugins(
    plugins: &[Box<dyn Plugin>],
    paths: &SnapshotPaths,
) -> Result<Vec<PluginResult>, PrBotError> {
    info!("Running {} plugin(s)", plugins.len());

    plugins
        .iter()
        .try_fold(Vec::with_capacity(plugins.len()), |mut results, plugin| {
            let name = plugin.name();
            if name.trim().is_empty() {
                return Err(PrBotError::UnnamedPlugin);
            }

            debug!("Running plugin '{}'", name);
            let output = plugin
                .run(paths)
                .map_err(|source| PrBotError::PluginFailed {
                    plugin: name.to_string(),
                    source: source.into(),
                })?;

            results.push(PluginResult {
                name: name.to_string(),
                output,
            });
            Ok(results)
        })
}

/// Concatenate each plugin's Markdown under a `###` heading.
///
/// # Examples
///
/// ```
/// use pr_bot::plugin::PluginOutput;
/// use pr_bot::runner::{compose_comment, PluginResult};
///
/// let results = vec![PluginResult {
///     name: "Size".to_string(),
///     output: PluginOutput {
///         pretty_log: None,
///         markdown_log: Some("All good".to_string()),
///     },
/// }];
///
/// assert_eq!(compose_comment(&results), "### Size\n\nAll good\n\n");
/// ```
pub fn compose_comment(results: &[PluginResult]) -> String {
    results
        .iter()
        .map(|result| {
            let markdown = result
                .output
                .markdown_log
                .as_deref()
                .unwrap_or(NO_MARKDOWN_MESSAGE);
            format!("### {}\n\n{}\n\n", result.name, markdown)
        })
        .collect()
}

/// Console rendering of every plugin's log
pub fn render_debug_info(results: &[PluginResult]) -> String {
    let mut output = format!("{}\n", DEBUG_HEADING);
    for result in results {
        output.push_str(&format!("  {}\n", result.name));
        match result.output.pretty_log.as_deref() {
            Some(log) => output.push_str(&format!("{}\n\n", log)),
            None => output.push_str(&format!("    {}\n\n", NO_LOG_MESSAGE)),
        }
    }
    output
}

/// Where [`BotRunner::report`] sent the results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDestination {
    /// Posted as a review comment
    Comment,
    /// Printed to the console
    Console,
}

/// Reports plugin results according to the CI context and configuration
pub struct BotRunner<'a> {
    config: &'a ConfigFile,
    ctx: &'a CiContext,
}

impl<'a> BotRunner<'a> {
    /// Create a runner for one bot invocation
    pub fn new(config: &'a ConfigFile, ctx: &'a CiContext) -> Self {
        Self { config, ctx }
    }

    /// Repository from the CI environment, falling back to the config file
    pub fn repo_details(&self) -> Option<RepoDetails> {
        self.ctx
            .repo_details
            .clone()
            .or_else(|| self.config.repo_details())
    }

    /// Fail when a comment is due on a pull request build but the repository
    /// is unknown. Called before the snapshots are built.
    ///
    /// # Errors
    ///
    /// [`PrBotError::MissingRepoDetails`]
    pub fn ensure_comment_target(&self, has_sink: bool) -> Result<(), PrBotError> {
        if has_sink && self.ctx.is_pull_request_build() && self.repo_details().is_none() {
            return Err(PrBotError::MissingRepoDetails);
        }
        Ok(())
    }

    /// Post or print `results`.
    ///
    /// A comment is posted only for pull request builds on CI with a sink
    /// available. When a bot username is configured, its earlier comments are
    /// deleted first. Everything else prints the console logs to `out`.
    ///
    /// # Errors
    ///
    /// [`PrBotError::MissingRepoDetails`] when a comment should be posted but
    /// the repository is unknown, or any sink or write failure.
    pub fn report(
        &self,
        results: &[PluginResult],
        sink: Option<&dyn ReportSink>,
        out: &mut dyn Write,
    ) -> anyhow::Result<ReportDestination> {
        if self.ctx.is_pull_request_build() {
            match sink {
                Some(sink) => {
                    let repo = self.repo_details().ok_or(PrBotError::MissingRepoDetails)?;
                    info!(
                        "Posting results to {}/{} #{}",
                        repo.owner,
                        repo.repo,
                        self.ctx.pull_request_number.as_deref().unwrap_or("?")
                    );

                    if let Some(bot_name) = self.config.bot_username.as_deref() {
                        sink.delete_prior_comments(bot_name)?;
                    }
                    sink.post_comment(&compose_comment(results))?;
                    return Ok(ReportDestination::Comment);
                }
                None => warn!("No comment destination configured, printing results instead"),
            }
        }

        out.write_all(render_debug_info(results).as_bytes())
            .map_err(|source| PrBotError::Io {
                context: "writing plugin results".to_string(),
                source,
            })?;
        Ok(ReportDestination::Console)
    }
}
