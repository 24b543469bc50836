use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Bookmark file to load. If `None`, the default Chrome profile location
    /// for the current platform is used.
    #[serde(default)]
    pub bookmarks_path: Option<PathBuf>,
    /// Queries starting with this character belong to launcher commands and
    /// are ignored by the bookmark search.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: Option<char>,
    /// Maximum number of results per query.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Fuzzy scores below this value are dropped.
    #[serde(default = "default_min_score")]
    pub min_score: i64,
    /// Look up favicons for matched bookmarks in the background.
    #[serde(default = "default_true")]
    pub enable_favicons: bool,
    /// Timeout in seconds for each favicon HTTP request.
    #[serde(default = "default_favicon_timeout")]
    pub favicon_timeout_secs: f32,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Enable toast notifications.
    #[serde(default = "default_true")]
    pub enable_toasts: bool,
}

fn default_command_prefix() -> Option<char> {
    Some('/')
}

fn default_max_results() -> usize {
    20
}

fn default_min_score() -> i64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_favicon_timeout() -> f32 {
    5.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bookmarks_path: None,
            command_prefix: default_command_prefix(),
            max_results: default_max_results(),
            min_score: default_min_score(),
            enable_favicons: true,
            favicon_timeout_secs: default_favicon_timeout(),
            debug_logging: false,
            log_file: None,
            enable_toasts: true,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Bookmark file to read, either configured or the platform default.
    pub fn bookmarks_path(&self) -> Option<PathBuf> {
        self.bookmarks_path
            .clone()
            .or_else(crate::bookmarks::default_bookmarks_path)
    }

    pub fn favicon_timeout(&self) -> Duration {
        if self.favicon_timeout_secs.is_finite() && self.favicon_timeout_secs > 0.0 {
            Duration::from_secs_f32(self.favicon_timeout_secs)
        } else {
            tracing::warn!(
                "favicon_timeout_secs {} is invalid; using default",
                self.favicon_timeout_secs
            );
            Duration::from_secs_f32(default_favicon_timeout())
        }
    }
}
