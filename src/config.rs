use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::theme::ThemeConfig;

const APP_DIR: &str = "planner-tui";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub log: LogConfig,
    pub theme: ThemeConfig,
    /// Shown under the month grid as this month's goals.
    pub goals: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    /// Only an explicitly given file is required to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn store_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .or_else(crate::calendar::Store::default_path)
            .unwrap_or_else(|| PathBuf::from("storage.json"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log
            .path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join("planner.log")))
            .unwrap_or_else(|| PathBuf::from("planner.log"))
    }
}
