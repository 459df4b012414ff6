//! Destinations for review comments

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;
use parking_lot::Mutex;

use crate::infra::{FileSystem, RealFileSystem};

/// Where the composed review comment goes
pub trait ReportSink {
    /// Remove comments previously posted by `bot_name`
    fn delete_prior_comments(&self, bot_name: &str) -> anyhow::Result<()>;

    /// Post a new comment
    fn post_comment(&self, body: &str) -> anyhow::Result<()>;
}

/// Writes the comment body to a file for a later CI step to post
///
/// There is only ever one comment, so deleting prior comments removes the
/// file.
pub struct CommentFileSink<FS: FileSystem = RealFileSystem> {
    path: PathBuf,
    fs: FS,
}

impl CommentFileSink<RealFileSystem> {
    /// Sink writing to `path` on the real filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<FS: FileSystem> CommentFileSink<FS> {
    /// Sink with a custom filesystem implementation
    pub fn with_fs(path: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// File the comment is written to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<FS: FileSystem> ReportSink for CommentFileSink<FS> {
    fn delete_prior_comments(&self, bot_name: &str) -> anyhow::Result<()> {
        debug!(
            "Removing previous comment by {} at {}",
            bot_name,
            self.path.display()
        );
        match self.fs.remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }

    fn post_comment(&self, body: &str) -> anyhow::Result<()> {
        self.fs
            .write(&self.path, body)
            .with_context(|| format!("Failed to write comment to {}", self.path.display()))
    }
}

/// Keeps comments in memory; useful for dry runs and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    comments: Mutex<Vec<String>>,
    deletions: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Comments posted so far
    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().clone()
    }

    /// Bot names whose comments were deleted, in call order
    pub fn deletions(&self) -> Vec<String> {
        self.deletions.lock().clone()
    }
}

impl ReportSink for MemorySink {
    fn delete_prior_comments(&self, bot_name: &str) -> anyhow::Result<()> {
        self.deletions.lock().push(bot_name.to_string());
        self.comments.lock().clear();
        Ok(())
    }

    fn post_comment(&self, body: &str) -> anyhow::Result<()> {
        self.comments.lock().push(body.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_comment_file_sink_writes_body() {
        let dir = TempDir::new().unwrap();
        let sink = CommentFileSink::new(dir.path().join("comment.md"));

        sink.post_comment("### PR-Bot Size Plugin").unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written, "### PR-Bot Size Plugin");
    }

    #[test]
    fn test_comment_file_sink_delete_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let sink = CommentFileSink::new(dir.path().join("comment.md"));

        assert!(sink.delete_prior_comments("bot").is_ok());
    }

    #[test]
    fn test_comment_file_sink_delete_removes_previous_comment() {
        let dir = TempDir::new().unwrap();
        let sink = CommentFileSink::new(dir.path().join("comment.md"));
        sink.post_comment("old").unwrap();

        sink.delete_prior_comments("bot").unwrap();

        assert!(!sink.path().exists());
    }

    #[test]
    fn test_memory_sink_records_calls() {
        let sink = MemorySink::new();
        sink.post_comment("first").unwrap();
        sink.delete_prior_comments("bot").unwrap();
        sink.post_comment("second").unwrap();

        assert_eq!(sink.comments(), vec!["second"]);
        assert_eq!(sink.deletions(), vec!["bot"]);
    }
}
