//! Configuration for the gallery
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (<config dir>/pexels-gallery/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.pexels.com/v1";
pub const DEFAULT_QUERY: &str = "nature";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Search API settings
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent verbatim in the Authorization header
    pub key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            key: String::new(),
        }
    }
}

/// Where downloads end up
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Target directory; `None` when the platform has no download dir
    pub dir: Option<PathBuf>,
    /// Show a save dialog instead of writing straight into `dir`
    pub prompt: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: dirs::download_dir().or_else(dirs::home_dir),
            prompt: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    /// Query searched at startup
    pub initial_query: String,
    pub download: DownloadConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            initial_query: DEFAULT_QUERY.to_string(),
            download: DownloadConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct FileApi {
    base_url: Option<String>,
    key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileSearch {
    initial_query: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileDownload {
    dir: Option<PathBuf>,
    prompt: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
}

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api: Option<FileApi>,
    search: Option<FileSearch>,
    download: Option<FileDownload>,
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path, e.g. ~/.config/pexels-gallery/config.toml on Linux
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pexels-gallery").join("config.toml"))
    }

    /// Load configuration: env vars -> file -> defaults
    ///
    /// A missing file is not an error. An unreadable or malformed file is,
    /// so the caller can report it once logging is up and fall back to
    /// [`Config::from_env`].
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::from_env()),
        }
    }

    /// Defaults overlaid with environment variables only
    pub fn from_env() -> Self {
        Self::resolve(FileConfig::default(), |name| std::env::var(name).ok())
    }

    /// Load a specific file, failing on read or parse errors
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        Ok(Self::resolve(file, |name| std::env::var(name).ok()))
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let api = file.api.unwrap_or_default();
        let search = file.search.unwrap_or_default();
        let download = file.download.unwrap_or_default();
        let logging = file.logging.unwrap_or_default();

        Self {
            api: ApiConfig {
                base_url: env("PEXELS_API_URL")
                    .or(api.base_url)
                    .unwrap_or(defaults.api.base_url),
                key: env("PEXELS_API_KEY")
                    .or(api.key)
                    .unwrap_or(defaults.api.key),
            },
            initial_query: search.initial_query.unwrap_or(defaults.initial_query),
            download: DownloadConfig {
                dir: env("PEXELS_DOWNLOAD_DIR")
                    .map(PathBuf::from)
                    .or(download.dir)
                    .or(defaults.download.dir),
                prompt: download.prompt.unwrap_or(defaults.download.prompt),
            },
            logging: LoggingConfig {
                level: logging.level.unwrap_or(defaults.logging.level),
            },
        }
    }
}
