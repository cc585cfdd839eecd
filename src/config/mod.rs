//! Configuration management for Hopeful.
//!
//! Configuration is read from `~/.config/hopeful/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_PAGE_SIZE;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedConfig,
    pub touch: TouchConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub page_size: usize,
    /// Choices offered by the minimum-score filter, besides "All".
    pub min_score_options: Vec<u8>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            min_score_options: vec![50, 65, 80, 90],
        }
    }
}

/// Pull-to-refresh input. Mouse drags stand in for touch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub enabled: bool,
    /// Logical pixels per terminal row.
    pub row_height_px: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            row_height_px: 16.0,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/hopeful/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("hopeful").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> &'static str {
        r##"# Hopeful configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# Base URL of the Hopeful News backend
base_url = "http://localhost:8000"

# Request timeout in seconds
timeout_secs = 10

[feed]
# Articles per page
page_size = 20

# Minimum hopefulness score choices for the filter bar
min_score_options = [50, 65, 80, 90]

[touch]
# Pull-to-refresh with a mouse drag from the top of the feed
enabled = true

# Logical pixels per terminal row (a pull needs 80 after damping)
row_height_px = 16.0

# Dark theme colors. The light theme is built in; toggle with "t".
[colors]
border = "DarkGray"
title = "LightYellow"
selection_bg = "Yellow"
selection_fg = "Black"
headline = "White"
summary = "Gray"
metadata = "DarkGray"
score = "LightGreen"
filter_active = "LightYellow"
filter_inactive = "DarkGray"
error_fg = "White"
error_bg = "Red"
pull_indicator = "LightCyan"
background = "Reset"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Navigation
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]

# Article actions
open_in_browser = ["o", "Enter"]
copy_link = ["y"]
share = ["s"]

# Feed
refresh = ["R", "F5"]
retry = ["r"]
toggle_dark_mode = ["t"]

# Filters
cycle_category = ["c"]
cycle_region = ["g"]
cycle_min_score = ["h"]
clear_filters = ["x"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.feed.page_size, 20);
        assert!(config.touch.enabled);
        assert_eq!(config.colors, ColorConfig::default());
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
base_url = "https://hopeful.example/api"

[colors]
border = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.base_url, "https://hopeful.example/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.colors.border, Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.selection_bg, Color::Yellow);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.feed.min_score_options, vec![50, 65, 80, 90]);
        assert_eq!(config.touch.row_height_px, 16.0);
        assert_eq!(config.keybindings.retry, vec!["r"]);
    }

    #[test]
    fn test_timeout_never_zero() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(api.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed]\npage_size = \"many\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
