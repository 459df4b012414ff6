//! CI/CD integration module
//!
//! Provides:
//! - CI environment discovery
//! - JSON output for CI/CD tool integration

pub mod context;
pub mod output;

pub use context::{CiContext, RepoDetails};
pub use output::{ComparisonSummary, JsonOutput};
