//! Configuration file data structures

use serde::Deserialize;

use crate::cicd::RepoDetails;
use crate::plugin::Plugin;
use crate::size::{GlobOptions, PathTransform, RewriteRule, SizePlugin, SizePluginOptions};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "pr-bot.toml";

/// Build command used when the configuration does not name one
pub const DEFAULT_BUILD_COMMAND: &str = "npm install && npm run build";

/// pr-bot configuration file structure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Shell command that builds a snapshot, run inside each snapshot directory
    #[serde(default = "default_build_command")]
    pub build_command: String,

    /// Login of the account posting comments; its earlier comments are removed
    pub bot_username: Option<String>,

    /// `owner/repo` slug used when the CI environment does not provide one
    pub repo: Option<String>,

    /// Size plugin settings; the plugin is disabled when absent
    pub size: Option<SizeSettings>,
}

fn default_build_command() -> String {
    DEFAULT_BUILD_COMMAND.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            build_command: default_build_command(),
            bot_username: None,
            repo: None,
            size: None,
        }
    }
}

/// `[size]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizeSettings {
    /// Files to compare, relative to each snapshot root
    pub glob_pattern: Option<String>,

    /// Let wildcards match dotfiles
    #[serde(default)]
    pub dot: bool,

    /// Match case-insensitively
    #[serde(default)]
    pub ignore_case: bool,

    /// Rewrites applied in order to each relative path
    #[serde(default)]
    pub path_transform: Vec<PathTransformRule>,
}

/// One `[[size.path-transform]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathTransformRule {
    /// Regular expression matched against the relative path
    pub pattern: String,
    /// Replacement text; may reference capture groups
    #[serde(default)]
    pub replacement: String,
}

impl SizeSettings {
    /// Turn the settings into plugin options, compiling path transform rules
    pub fn plugin_options(&self) -> Result<SizePluginOptions, regex::Error> {
        let rules = self
            .path_transform
            .iter()
            .map(|rule| RewriteRule::new(&rule.pattern, rule.replacement.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SizePluginOptions {
            glob_pattern: self.glob_pattern.clone(),
            glob_options: GlobOptions {
                dot: self.dot,
                case_sensitive: !self.ignore_case,
            },
            path_transform: (!rules.is_empty()).then(|| PathTransform::from_rules(rules)),
        })
    }
}

impl ConfigFile {
    /// Repository from the `repo` slug, if set and well formed
    pub fn repo_details(&self) -> Option<RepoDetails> {
        self.repo.as_deref().and_then(RepoDetails::from_slug)
    }

    /// Instantiate the configured plugins in reporting order
    pub fn plugins(&self) -> Result<Vec<Box<dyn Plugin>>, regex::Error> {
        let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
        if let Some(size) = &self.size {
            plugins.push(Box::new(SizePlugin::new(size.plugin_options()?)));
        }
        Ok(plugins)
    }
}
