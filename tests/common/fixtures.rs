//! Test fixture helpers for creating build snapshots
//!
//! A snapshot is a temporary directory filled with files of known sizes.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Files of the base snapshot in the reference scenario
pub const SAMPLE_BEFORE: &[(&str, usize)] = &[
    ("a.txt", 45),
    ("b.jpg", 268_633),
    ("c.txt", 0),
    ("d.txt", 29),
];

/// Files of the head snapshot in the reference scenario
pub const SAMPLE_AFTER: &[(&str, usize)] = &[
    ("a.txt", 0),
    ("b.jpg", 104_004),
    ("c.txt", 38),
    ("d.txt", 50),
    ("e.txt", 21),
];

/// Write `files` (relative path, size in bytes) below `root`
pub fn write_files(root: &Path, files: &[(&str, usize)]) -> anyhow::Result<()> {
    for (index, (relative_path, size)) in files.iter().enumerate() {
        let path = root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Vary the byte per file so gzip sizes differ between files
        let byte = b'a' + (index % 26) as u8;
        fs::write(path, vec![byte; *size])?;
    }
    Ok(())
}

/// Create a snapshot directory containing `files`
///
/// The TempDir must be kept alive for as long as the snapshot is used.
pub fn create_snapshot(files: &[(&str, usize)]) -> anyhow::Result<TempDir> {
    let dir = TempDir::new()?;
    write_files(dir.path(), files)?;
    Ok(dir)
}

/// Create the reference before/after snapshots
pub fn sample_snapshots() -> anyhow::Result<(TempDir, TempDir)> {
    Ok((create_snapshot(SAMPLE_BEFORE)?, create_snapshot(SAMPLE_AFTER)?))
}

/// Write a `pr-bot.toml` with `contents` into `dir` and return its path
pub fn write_config(dir: &Path, contents: &str) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.join("pr-bot.toml");
    fs::write(&path, contents)?;
    Ok(path)
}
