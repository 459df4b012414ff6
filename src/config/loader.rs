//! Configuration file loading

use super::file::ConfigFile;
use crate::error::PrBotError;
use crate::infra::{FileSystem, RealFileSystem};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the config at `config_path`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pr_bot::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("pr-bot.toml"))?;
    /// println!("Build command: {}", config.build_command);
    /// # Ok::<(), pr_bot::error::PrBotError>(())
    /// ```
    pub fn load(config_path: &Path) -> Result<ConfigFile, PrBotError> {
        Self::load_with_fs(config_path, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(
        config_path: &Path,
        fs: &FS,
    ) -> Result<ConfigFile, PrBotError> {
        let contents = fs.read_to_string(config_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PrBotError::ConfigNotFound {
                    path: config_path.to_path_buf(),
                    source,
                }
            } else {
                PrBotError::Io {
                    context: format!("reading {}", config_path.display()),
                    source,
                }
            }
        })?;

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| PrBotError::ConfigInvalid {
                path: config_path.to_path_buf(),
                message: e.to_string(),
            })?;

        // Compile transform rules now so a bad regex fails before any build
        if let Some(size) = &config.size {
            size.plugin_options()
                .map_err(|e| PrBotError::ConfigInvalid {
                    path: config_path.to_path_buf(),
                    message: e.to_string(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                should_fail_read: false,
            }
        }

        fn with_read_error() -> Self {
            Self {
                file_content: None,
                should_fail_read: true,
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            unimplemented!()
        }

        fn remove_file(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("pr-bot.toml");

        let toml_content = r#"
build-command = "make dist"
bot-username = "size-bot"

[size]
glob-pattern = "dist/**/*"

[[size.path-transform]]
pattern = '\.[0-9a-f]{8}\.'
replacement = "."
"#;
        std::fs::write(&config_path, toml_content).unwrap();

        let config = ConfigLoader::load(&config_path).unwrap();
        assert_eq!(config.build_command, "make dist");
        assert_eq!(config.bot_username.as_deref(), Some("size-bot"));
        let size = config.size.unwrap();
        assert_eq!(size.glob_pattern.as_deref(), Some("dist/**/*"));
        assert_eq!(size.path_transform.len(), 1);
        assert!(!size.dot);
    }

    #[test]
    fn test_loader_with_missing_file_returns_not_found() {
        let fs = MockFileSystem::new();
        let result = ConfigLoader::load_with_fs(Path::new("/test/pr-bot.toml"), &fs);

        assert!(matches!(result, Err(PrBotError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_loader_with_permission_error_returns_io_error() {
        let fs = MockFileSystem::with_read_error();
        let result = ConfigLoader::load_with_fs(Path::new("/test/pr-bot.toml"), &fs);

        let err = result.unwrap_err();
        assert!(matches!(err, PrBotError::Io { .. }));
        assert!(err.to_string().contains("pr-bot.toml"));
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MockFileSystem::with_content("invalid { toml syntax");
        let result = ConfigLoader::load_with_fs(Path::new("/test/pr-bot.toml"), &fs);

        assert!(matches!(result, Err(PrBotError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_loader_with_invalid_transform_regex_returns_error() {
        let fs = MockFileSystem::with_content(
            r#"
[size]
glob-pattern = "**/*"
path-transform = [{ pattern = "(unclosed", replacement = "" }]
"#,
        );
        let result = ConfigLoader::load_with_fs(Path::new("/test/pr-bot.toml"), &fs);

        assert!(matches!(result, Err(PrBotError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MockFileSystem::with_content("");
        let config = ConfigLoader::load_with_fs(Path::new("/test/pr-bot.toml"), &fs).unwrap();

        assert_eq!(config.build_command, "npm install && npm run build");
        assert!(config.size.is_none());
    }
}
