//! Snapshot inventory: per-file sizes for one build output directory

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::write::GzEncoder;
use flate2::Compression;
use glob::{MatchOptions, Pattern};
use log::{debug, warn};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use super::error::SizeError;

/// Size details of one matched file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path relative to the snapshot root, `/` separated, after any transform
    pub relative_path: String,
    /// File size on disk
    pub size_in_bytes: u64,
    /// Size of the gzip-compressed contents
    pub gzip_size_in_bytes: u64,
}

/// Files of one snapshot keyed by relative path
pub type Inventory = BTreeMap<String, FileRecord>;

/// Matching flags applied to the glob pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobOptions {
    /// Let wildcards match path components starting with `.`
    pub dot: bool,
    /// Match letters case sensitively
    pub case_sensitive: bool,
}

impl Default for GlobOptions {
    fn default() -> Self {
        Self {
            dot: false,
            case_sensitive: true,
        }
    }
}

impl GlobOptions {
    fn match_options(self) -> MatchOptions {
        MatchOptions {
            case_sensitive: self.case_sensitive,
            require_literal_separator: true,
            require_literal_leading_dot: !self.dot,
        }
    }
}

/// A regex rewrite applied to relative paths
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Compile a rule; `replacement` may reference capture groups (`$1`).
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    fn apply(&self, path: &str) -> String {
        self.pattern
            .replace_all(path, self.replacement.as_str())
            .into_owned()
    }
}

/// Rewrites relative paths so equivalent files from both snapshots share a key
///
/// Typical use is stripping content hashes from bundler output, so that
/// `app.1a2b3c4d.js` and `app.5e6f7a8b.js` are compared as `app.js`.
#[derive(Clone)]
pub struct PathTransform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl PathTransform {
    /// Wrap an arbitrary rewrite function
    ///
    /// # Examples
    ///
    /// ```
    /// use pr_bot::size::PathTransform;
    ///
    /// let transform = PathTransform::new(|path| path.to_uppercase());
    /// assert_eq!(transform.apply("a.js"), "A.JS");
    /// ```
    pub fn new(transform: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(transform))
    }

    /// Apply regex rules in order, each to the output of the previous one
    pub fn from_rules(rules: Vec<RewriteRule>) -> Self {
        Self::new(move |path| {
            rules
                .iter()
                .fold(path.to_string(), |current, rule| rule.apply(&current))
        })
    }

    /// Rewrite one relative path
    pub fn apply(&self, path: &str) -> String {
        (self.0)(path)
    }
}

impl fmt::Debug for PathTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathTransform(..)")
    }
}

/// What to match inside a snapshot and how to key the results
#[derive(Debug, Clone, Default)]
pub struct InventoryOptions {
    /// Glob pattern relative to the snapshot root, e.g. `dist/**/*.{js,css}`
    pub glob_pattern: String,
    /// Matching flags
    pub glob_options: GlobOptions,
    /// Optional rewrite of relative paths before they become keys
    pub path_transform: Option<PathTransform>,
}

/// Builds [`Inventory`] values for snapshot directories
#[derive(Debug, Clone)]
pub struct FileInventory {
    options: InventoryOptions,
}

impl FileInventory {
    /// Create a scanner for the given options
    pub fn new(options: InventoryOptions) -> Self {
        Self { options }
    }

    /// Scan `root_dir` and record every regular file matching the pattern.
    ///
    /// Files are measured in parallel. Keys are relative to `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid, the root cannot be
    /// resolved, enumeration fails, or a matched file cannot be read.
    pub fn build(&self, root_dir: &Path) -> Result<Inventory, SizeError> {
        let root = fs::canonicalize(root_dir).map_err(|e| SizeError::io(root_dir, e))?;
        let matches = self.matching_paths(&root)?;
        debug!(
            "{} paths match '{}' under {}",
            matches.len(),
            self.options.glob_pattern,
            root.display()
        );

        let records = matches
            .par_iter()
            .map(|path| measure_file(&root, path))
            .collect::<Result<Vec<_>, SizeError>>()?;

        let mut inventory = Inventory::new();
        for record in records.into_iter().flatten() {
            let record = match &self.options.path_transform {
                Some(transform) => FileRecord {
                    relative_path: transform.apply(&record.relative_path),
                    ..record
                },
                None => record,
            };
            let key = record.relative_path.clone();
            if inventory.insert(key, record).is_some() {
                warn!(
                    "Several files in {} map to the same path; keeping the last one",
                    root.display()
                );
            }
        }

        Ok(inventory)
    }

    /// Walk `root` once and keep the paths matching any brace alternative.
    fn matching_paths(&self, root: &Path) -> Result<BTreeSet<PathBuf>, SizeError> {
        let root_str = root
            .to_str()
            .ok_or_else(|| SizeError::NonUtf8Path(root.to_path_buf()))?;
        let relative_pattern = self
            .options
            .glob_pattern
            .trim_start_matches("./")
            .trim_start_matches('/');

        let alternatives: Vec<String> = expand_braces(relative_pattern)
            .into_iter()
            .map(|alternative| match_files_below(&alternative))
            .collect();
        let patterns = alternatives
            .iter()
            .map(|alternative| {
                Pattern::new(alternative).map_err(|source| SizeError::InvalidGlobPattern {
                    pattern: alternative.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Hidden directories are only entered when a match inside them is possible
        let names_dot_component = alternatives
            .iter()
            .any(|alternative| alternative.starts_with('.') || alternative.contains("/."));
        let walk_options = MatchOptions {
            require_literal_leading_dot: !(self.options.glob_options.dot || names_dot_component),
            ..MatchOptions::new()
        };
        let walk_pattern = format!(
            "{}/**/*",
            Pattern::escape(root_str.trim_end_matches('/'))
        );
        let entries = glob::glob_with(&walk_pattern, walk_options).map_err(|source| {
            SizeError::InvalidGlobPattern {
                pattern: walk_pattern.clone(),
                source,
            }
        })?;

        let match_options = self.options.glob_options.match_options();
        let mut paths = BTreeSet::new();
        for entry in entries {
            let path = entry?;
            let relative = relative_key(root, &path);
            if patterns
                .iter()
                .any(|pattern| pattern.matches_with(&relative, match_options))
            {
                paths.insert(path);
            }
        }

        Ok(paths)
    }
}

/// A trailing `**` means every file below, not only the directories.
fn match_files_below(alternative: &str) -> String {
    if alternative == "**" || alternative.ends_with("/**") {
        format!("{alternative}/*")
    } else {
        alternative.to_string()
    }
}

/// Measure one matched path; directories and other non-files yield `None`.
fn measure_file(root: &Path, path: &Path) -> Result<Option<FileRecord>, SizeError> {
    let metadata = fs::metadata(path).map_err(|e| SizeError::io(path, e))?;
    if !metadata.is_file() {
        return Ok(None);
    }

    let contents = fs::read(path).map_err(|e| SizeError::io(path, e))?;
    let gzip_size_in_bytes = gzip_size(&contents).map_err(|e| SizeError::io(path, e))?;

    Ok(Some(FileRecord {
        relative_path: relative_key(root, path),
        size_in_bytes: metadata.len(),
        gzip_size_in_bytes,
    }))
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Length of the gzip stream for `contents` at maximum compression
pub fn gzip_size(contents: &[u8]) -> std::io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(contents)?;
    Ok(encoder.finish()?.len() as u64)
}

/// Expand `{a,b}` alternations into separate patterns.
///
/// Braces without a top-level comma are kept literally.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, close)) = find_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let body = &pattern[open + 1..close];
    let suffix = &pattern[close + 1..];
    let alternatives = split_top_level(body);

    if alternatives.len() < 2 {
        let bodies = expand_braces(body);
        let rests = expand_braces(suffix);
        return bodies
            .iter()
            .flat_map(|body| {
                rests
                    .iter()
                    .map(move |rest| format!("{prefix}{{{body}}}{rest}"))
            })
            .collect();
    }

    alternatives
        .iter()
        .flat_map(|alternative| expand_braces(&format!("{prefix}{alternative}{suffix}")))
        .collect()
}

fn find_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut open = None;
    for (index, ch) in pattern.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    open = Some(index);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|start| (start, index));
                }
            }
            _ => {}
        }
    }
    None
}

fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
