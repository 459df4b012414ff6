//! Run command implementation
//!
//! Handles the `pr-bot run` command: load `pr-bot.toml`, build both
//! snapshots, run the configured plugins and report the results

use anyhow::Result;
use console::style;
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::builder::SnapshotBuilder;
use crate::cicd::CiContext;
use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::PrBotError;
use crate::fmt::{CHECKMARK, COMMENT, WARNING};
use crate::plugin::SnapshotPaths;
use crate::runner::{run_plugins, BotRunner, CommentFileSink, ReportDestination, ReportSink};

/// Options for [`cmd_run`]
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Checkout of the base revision
    pub before: PathBuf,
    /// Checkout of the proposed change
    pub after: PathBuf,
    /// Config file; `pr-bot.toml` in the current directory when absent
    pub config: Option<PathBuf>,
    /// Compare the directories as they are, without running the build command
    pub skip_build: bool,
    /// Where to write the review comment on pull request builds
    pub comment_file: Option<PathBuf>,
}

/// Run the bot against two checkouts using the process CI environment
///
/// # Examples
///
/// ```no_run
/// use pr_bot::cmd::run::{cmd_run, RunOptions};
///
/// cmd_run(&RunOptions {
///     before: "base".into(),
///     after: "head".into(),
///     skip_build: true,
///     ..RunOptions::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_run(options: &RunOptions) -> Result<()> {
    let ctx = CiContext::from_env();
    let destination = run_with_context(options, &ctx, &mut std::io::stdout())?;

    match (destination, options.comment_file.as_deref()) {
        (ReportDestination::Comment, Some(path)) => println!(
            "{} Comment written to {}",
            COMMENT,
            style(path.display()).cyan()
        ),
        _ => println!("{} {}", CHECKMARK, style("Done").green()),
    }
    Ok(())
}

/// Run the bot with an explicit CI context, printing reports to `out`
pub fn run_with_context(
    options: &RunOptions,
    ctx: &CiContext,
    out: &mut dyn Write,
) -> Result<ReportDestination> {
    let config = load_config(options.config.as_deref())?;
    let paths = SnapshotPaths::new(&options.before, &options.after);
    let runner = BotRunner::new(&config, ctx);
    runner.ensure_comment_target(options.comment_file.is_some())?;

    if options.skip_build {
        info!("Skipping build, comparing directories as they are");
    } else {
        SnapshotBuilder::new(config.build_command.clone()).build(&paths)?;
    }

    let plugins = config
        .plugins()
        .map_err(|e| PrBotError::ConfigInvalid {
            path: config_path(options.config.as_deref()),
            message: e.to_string(),
        })?;
    if plugins.is_empty() {
        eprintln!(
            "{} No plugins configured; add a [size] section to {}",
            WARNING, CONFIG_FILE_NAME
        );
    }

    let results = run_plugins(&plugins, &paths)?;

    let sink = options.comment_file.as_deref().map(CommentFileSink::new);
    runner.report(
        &results,
        sink.as_ref().map(|s| s as &dyn ReportSink),
        out,
    )
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf)
}

/// Load the explicit config, or the default file if it exists.
///
/// A missing default file means defaults; a missing explicit file is an error.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, PrBotError> {
    match explicit {
        Some(path) => ConfigLoader::load(path),
        None => match ConfigLoader::load(Path::new(CONFIG_FILE_NAME)) {
            Err(PrBotError::ConfigNotFound { .. }) => {
                info!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(ConfigFile::default())
            }
            other => other,
        },
    }
}
