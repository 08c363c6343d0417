//! Configuration management.
//!
//! Configuration is read from `~/.config/wapp/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::content::{HOME_PAGE_SIZE, LISTING_PAGE_SIZE};
use crate::presenter::SupersedePolicy;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Settings for talking to the remote content API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL scheme used to build `{scheme}://{host}/wp-json`.
    pub scheme: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub listing_page_size: u32,
    pub home_page_size: u32,
    pub policy: SupersedePolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            timeout_secs: 10,
            user_agent: format!("wapp/{}", env!("CARGO_PKG_VERSION")),
            listing_page_size: LISTING_PAGE_SIZE,
            home_page_size: HOME_PAGE_SIZE,
            policy: SupersedePolicy::LastResolved,
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

    /// Get the default config file path: `~/.config/wapp/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("wapp").join("config.toml"))
    }

    /// Create a default config file with comments.
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
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

        tracing::info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Commented starter file. Every setting is optional; the values shown
    /// are the built-in defaults.
    fn default_config_content() -> String {
        format!(
            r##"# Wapp configuration

[api]
# Sites are queried at {{scheme}}://{{host}}/wp-json
scheme = "https"
timeout_secs = 10
# user_agent = "{user_agent}"

# Items per page on the Posts/Pages screens, and per home screen section
listing_page_size = {listing}
home_page_size = {home}

# When an older request finishes after a newer one for the same screen:
# "last-resolved" shows whichever finished last,
# "latest-issued" ignores results of superseded requests.
policy = "last-resolved"

[colors]
# Only list the colors you want to change. Accepted values are color names
# (Cyan, DarkGray, LightRed, ...), 256-color indexes, "#RRGGBB" and "#RGB".
#
# active_border, inactive_border,
# selection_bg_active, selection_fg_active,
# selection_bg_inactive, selection_fg_inactive,
# heading, skeleton, error,
# metadata_author, metadata_date, metadata_link,
# status_fg, status_bg
#
# error = "LightRed"

[keybindings]
# action = [keys]; listing an action replaces its default keys.
# Keys: single characters, Enter, Tab, BackTab, Backspace, Delete, Home, End,
# PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12, optionally
# prefixed with Ctrl+, Shift+ or Alt+.
#
# quit = ["q", "Ctrl+c"]          move_up = ["k", "Up"]
# move_down = ["j", "Down"]       next_page = ["n", "PageDown"]
# prev_page = ["p", "PageUp"]     next_pane = ["Tab"]
# prev_pane = ["BackTab"]         go_home = ["h", "0"]
# go_posts = ["1"]                go_pages = ["2"]
# change_site = ["S"]             select = ["Enter"]
# open_in_browser = ["o"]         reload = ["R"]
# filter_category = ["c"]         filter_tag = ["t"]
# clear_filter = ["x", "Backspace"]
"##,
            user_agent = ApiConfig::default().user_agent,
            listing = LISTING_PAGE_SIZE,
            home = HOME_PAGE_SIZE,
        )
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

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.colors.active_border, ratatui::style::Color::Cyan);
        assert_eq!(config.keybindings, KeybindingConfig::default());
        assert!(config.api.user_agent.starts_with("wapp/"));
        assert_eq!(config.api.listing_page_size, 12);
        assert_eq!(config.api.home_page_size, 3);
        assert_eq!(config.api.policy, SupersedePolicy::LastResolved);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
policy = "latest-issued"
timeout_secs = 3

[colors]
active_border = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.policy, SupersedePolicy::LatestIssued);
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.scheme, "https");
        assert_eq!(
            config.colors.active_border,
            ratatui::style::Color::Rgb(255, 0, 0)
        );
        assert_eq!(
            config.colors.inactive_border,
            ratatui::style::Color::DarkGray
        );
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.colors.active_border, ratatui::style::Color::Cyan);
        assert_eq!(config.api.listing_page_size, 12);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[api]\npolicy = \"whenever\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_create_and_load_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.scheme, "https");
        assert_eq!(config.colors, ColorConfig::default());
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
