//! Top-level error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use pr_bot::config::ConfigLoader;
//! use std::path::Path;
//!
//! match ConfigLoader::load(Path::new("pr-bot.toml")) {
//!     Ok(config) => println!("Build command: {}", config.build_command),
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user by the bot
#[derive(Error, Debug)]
pub enum PrBotError {
    /// Configuration file not found
    #[error("Unable to find the config file: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration file could not be parsed or validated
    #[error("Invalid config file {path}: {message}")]
    ConfigInvalid {
        /// Path to config file
        path: PathBuf,
        /// Parser or validation message
        message: String,
    },

    /// Repository owner/name could not be determined
    #[error("Unable to get the repository details from the CI environment or the config file")]
    MissingRepoDetails,

    /// Build command failed in the "after" snapshot
    #[error("Build command failed in {dir}: {command}")]
    BuildFailed {
        /// Command that failed
        command: String,
        /// Snapshot directory it ran in
        dir: PathBuf,
        /// Exit status or spawn error description
        detail: String,
    },

    /// A plugin was registered without a name
    #[error("One of the plugins has failed to define a name. This is required for reporting.")]
    UnnamedPlugin,

    /// A plugin failed while running
    #[error("The '{plugin}' threw an error while running")]
    PluginFailed {
        /// Name of the failing plugin
        plugin: String,
        #[source]
        /// Underlying plugin error
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl PrBotError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pr_bot::error::PrBotError;
    ///
    /// let suggestion = PrBotError::MissingRepoDetails.suggestion().unwrap();
    /// assert!(suggestion.contains("repo"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigNotFound { path, .. } => Some(format!(
                "Create {} or pass --config <FILE>",
                path.display()
            )),
            Self::ConfigInvalid { .. } => {
                Some("Check the TOML syntax and any path-transform regular expressions".to_string())
            }
            Self::MissingRepoDetails => Some(
                "Set TRAVIS_REPO_SLUG or add repo = \"owner/name\" to pr-bot.toml".to_string(),
            ),
            Self::BuildFailed { command, .. } => Some(format!(
                "Run '{}' locally in the snapshot directory to see the failure",
                command
            )),
            Self::UnnamedPlugin => Some("Give every plugin a non-empty name".to_string()),
            Self::PluginFailed { .. } => {
                Some("Check the plugin configuration in pr-bot.toml".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. } => 66, // EX_NOINPUT
            Self::ConfigInvalid { .. } => 78, // EX_CONFIG
            Self::MissingRepoDetails => 78,   // EX_CONFIG
            Self::BuildFailed { .. } => 1,    // Generic error (CI should fail)
            Self::UnnamedPlugin => 70,        // EX_SOFTWARE
            Self::PluginFailed { .. } => 1,   // Generic error
            Self::Io { .. } => 74,            // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(bot_error) = error.downcast_ref::<PrBotError>() {
            if let Some(suggestion) = bot_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(bot_error) = error.downcast_ref::<PrBotError>() {
            bot_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
