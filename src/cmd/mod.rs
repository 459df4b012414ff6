//! Command handlers for the pr-bot CLI
//!
//! Each submodule handles a specific CLI command.

pub mod compare;
pub mod completions;
pub mod run;

// Re-export command functions for convenient access
pub use compare::{cmd_compare, CompareOptions};
pub use completions::cmd_completions;
pub use run::{cmd_run, RunOptions};
