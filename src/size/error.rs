//! Error types for the size plugin

use std::path::PathBuf;
use thiserror::Error;

use crate::table::TableError;

/// Errors that can occur while scanning snapshots or rendering size reports
#[derive(Error, Debug)]
pub enum SizeError {
    /// No glob pattern was configured, nothing can be scanned
    #[error("the '{plugin}' requires a 'glob_pattern' option")]
    MissingGlobPattern {
        /// Name of the plugin missing the option
        plugin: String,
    },

    /// The glob pattern could not be parsed
    #[error("invalid glob pattern '{pattern}'")]
    InvalidGlobPattern {
        /// Pattern as handed to the matcher
        pattern: String,
        #[source]
        /// Parser error
        source: glob::PatternError,
    },

    /// Enumerating matches failed part way through
    #[error("failed to enumerate files")]
    Scan(#[from] glob::GlobError),

    /// Snapshot path is not valid UTF-8 and cannot be turned into a pattern
    #[error("snapshot path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    /// Reading a matched file or the snapshot root failed
    #[error("failed to read {path}")]
    Io {
        /// Path that could not be read
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Report rows did not fit the table layout
    #[error("failed to render report table: {0}")]
    Table(#[from] TableError),
}

impl SizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
