//! Configuration for gazette.
//!
//! Read from `~/.config/gazette/config.toml` at startup. If the file doesn't
//! exist, a commented default configuration is created. Missing fields fall
//! back to defaults.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{FeedSource, Language};
use crate::tui::theme::Theme;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed endpoints, fetched concurrently each cycle.
    pub feeds: Vec<String>,
    /// Default target language code.
    pub language: String,
    /// Initial theme: "light" or "dark".
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feeds: vec![
                "http://feeds.bbci.co.uk/news/rss.xml".into(),
                "http://rss.cnn.com/rss/edition_world.rss".into(),
                "http://feeds.reuters.com/Reuters/worldNews".into(),
                "https://www.theguardian.com/international/rss".into(),
                "https://www.aljazeera.com/xml/rss/all.xml".into(),
                "https://techcrunch.com/feed/".into(),
            ],
            language: "en".into(),
            theme: "light".into(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Validated feed sources.
    pub fn sources(&self) -> crate::app::Result<Vec<FeedSource>> {
        self.feeds.iter().map(|url| FeedSource::parse(url)).collect()
    }

    pub fn language(&self) -> crate::app::Result<Language> {
        self.language.parse()
    }

    pub fn theme(&self) -> Theme {
        Theme::from_name(&self.theme).unwrap_or_default()
    }

    /// `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Gazette configuration
#
# feeds: list of RSS/Atom endpoints fetched concurrently each cycle.
# language: default translation target. One of:
#   en, es, fr, de, zh-cn, ja, ru, ar
# theme: "light" or "dark" (toggle at runtime with t)

feeds = [
    "http://feeds.bbci.co.uk/news/rss.xml",
    "http://rss.cnn.com/rss/edition_world.rss",
    "http://feeds.reuters.com/Reuters/worldNews",
    "https://www.theguardian.com/international/rss",
    "https://www.aljazeera.com/xml/rss/all.xml",
    "https://techcrunch.com/feed/",
]

language = "en"
theme = "light"
"##
        .to_string()
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
