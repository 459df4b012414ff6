//! Builds both snapshots before the plugins compare them

use console::style;
use log::{error, info};
use std::path::Path;
use std::process::Output;

use crate::error::PrBotError;
use crate::fmt::HAMMER;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::plugin::SnapshotPaths;

/// Runs the configured build command inside each snapshot directory
pub struct SnapshotBuilder<CE: CommandExecutor = RealCommandExecutor> {
    build_command: String,
    executor: CE,
}

impl SnapshotBuilder<RealCommandExecutor> {
    /// Builder running `build_command` through `sh -c`
    pub fn new(build_command: impl Into<String>) -> Self {
        Self::with_executor(build_command, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> SnapshotBuilder<CE> {
    /// Builder with a custom command executor
    pub fn with_executor(build_command: impl Into<String>, executor: CE) -> Self {
        Self {
            build_command: build_command.into(),
            executor,
        }
    }

    /// Build the "before" snapshot, then the "after" snapshot.
    ///
    /// A failing "before" build is logged and tolerated so that a broken base
    /// branch still gets a report. A failing "after" build aborts the run.
    pub fn build(&self, paths: &SnapshotPaths) -> Result<(), PrBotError> {
        println!(
            "{} {} snapshots with '{}'",
            HAMMER,
            style("Building").bold(),
            self.build_command
        );

        if let Err(e) = self.build_dir(&paths.before) {
            error!("Unable to build the base snapshot: {}", e);
        }
        self.build_dir(&paths.after)
    }

    fn build_dir(&self, dir: &Path) -> Result<(), PrBotError> {
        info!("Running '{}' in {}", self.build_command, dir.display());

        let output = self
            .executor
            .execute(
                |cmd| cmd.arg("-c").arg(&self.build_command).current_dir(dir),
                "sh",
            )
            .map_err(|e| self.failure(dir, e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(dir, failure_detail(&output)))
        }
    }

    fn failure(&self, dir: &Path, detail: String) -> PrBotError {
        PrBotError::BuildFailed {
            command: self.build_command.clone(),
            dir: dir.to_path_buf(),
            detail,
        }
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    match stderr.lines().rev().find(|line| !line.trim().is_empty()) {
        Some(line) => format!("{}: {}", output.status, line.trim()),
        None => output.status.to_string(),
    }
}
