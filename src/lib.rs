#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! pr-bot library
//!
//! This library provides the pieces behind the `pr-bot` CLI: scanning two
//! build snapshots, comparing file sizes and rendering console and Markdown
//! reports. It can be used programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Comparing two snapshot directories with the size plugin:
//!
//! ```
//! use pr_bot::plugin::{Plugin, SnapshotPaths};
//! use pr_bot::size::{SizePlugin, SizePluginOptions};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let before = TempDir::new().unwrap();
//! let after = TempDir::new().unwrap();
//! fs::write(before.path().join("app.js"), "console.log(1)").unwrap();
//! fs::write(after.path().join("app.js"), "console.log(1, 2, 3)").unwrap();
//!
//! let plugin = SizePlugin::new(SizePluginOptions {
//!     glob_pattern: Some("*.js".to_string()),
//!     ..SizePluginOptions::default()
//! });
//!
//! let output = plugin
//!     .run(&SnapshotPaths::new(before.path(), after.path()))
//!     .unwrap();
//! assert!(output.markdown_log.unwrap().contains("app.js"));
//! ```
//!
//! # Advanced Example: Running Plugins and Composing a Comment
//!
//! ```
//! use pr_bot::config::ConfigFile;
//! use pr_bot::plugin::SnapshotPaths;
//! use pr_bot::runner::{compose_comment, run_plugins};
//! use tempfile::TempDir;
//!
//! let config: ConfigFile = toml_edit::de::from_str(
//!     r#"
//! [size]
//! glob-pattern = "**/*"
//! "#,
//! )
//! .unwrap();
//!
//! let snapshot = TempDir::new().unwrap();
//! let paths = SnapshotPaths::new(snapshot.path(), snapshot.path());
//!
//! let results = run_plugins(&config.plugins().unwrap(), &paths).unwrap();
//! let comment = compose_comment(&results);
//! assert!(comment.starts_with("### PR-Bot Size Plugin"));
//! assert!(comment.contains("No file sizes have changed."));
//! ```

/// Runs the build command in each snapshot
pub mod builder;
/// CI environment discovery and JSON output
pub mod cicd;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Plugin contract
pub mod plugin;
/// Plugin orchestration and reporting
pub mod runner;
/// File size comparison plugin
pub mod size;
/// Column-aligned console and Markdown tables
pub mod table;
