//! Configuration for pr-bot
//!
//! This module provides:
//! - `pr-bot.toml` data structures
//! - Loading and validation of the config file

pub mod file;
pub mod loader;

pub use file::{
    ConfigFile, PathTransformRule, SizeSettings, CONFIG_FILE_NAME, DEFAULT_BUILD_COMMAND,
};
pub use loader::ConfigLoader;
