//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Snapshot directory fixtures
//! - Helpers for picking apart rendered reports
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let (before, after) = fixtures::sample_snapshots().unwrap();
//! ```

pub mod assertions;
pub mod fixtures;
