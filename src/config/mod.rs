//! Configuration management for rss-reader.
//!
//! Configuration is read from `~/.config/rss-reader/config.toml` (or the
//! path given with `--config`). If the default file doesn't exist, one with
//! commented defaults is created.

pub mod labels;

pub use labels::Labels;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "rss-reader";
const DB_FILE_NAME: &str = "news.db";
const LOG_FILE_NAME: &str = "rss_reader.log";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub pdf: PdfConfig,
    pub labels: Labels,
}

/// Location of the news cache database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: data_path(DB_FILE_NAME),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file; its whole content is printed by `--verbose`.
    pub file: PathBuf,
    /// Default level when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: data_path(LOG_FILE_NAME),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("rss-reader/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fonts embedded in `--to-pdf` output.
///
/// Without `font` the PDF falls back to built-in Helvetica, which only
/// covers Latin-1; other characters are printed as `?`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// TrueType/OpenType font used for body text.
    pub font: Option<PathBuf>,
    /// Font for headings; `font` is reused when unset.
    pub bold_font: Option<PathBuf>,
}

/// `<data_dir>/rss-reader/<file>`, or `<file>` in the working directory when
/// the platform has no data directory.
fn data_path(file: &str) -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(file))
        .unwrap_or_else(|| PathBuf::from(file))
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one, the default
    /// path is used and created with commented defaults if missing.
    /// Missing fields in the config file use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path: `~/.config/rss-reader/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

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

    fn default_config_content() -> String {
        r##"# rss-reader configuration
#
# Every key is optional; missing keys use the values shown here.

[cache]
# SQLite file holding cached news, one entry per publication date.
# Defaults to <data dir>/rss-reader/news.db
# path = "news.db"

[logging]
# Log file printed by `rss-reader --verbose`.
# Defaults to <data dir>/rss-reader/rss_reader.log
# file = "rss_reader.log"

# trace, debug, info, warn or error. RUST_LOG takes precedence.
level = "info"

[http]
# user_agent = "rss-reader/0.1.0"

[pdf]
# Unicode font embedded in PDF output. Without it only Latin-1 text
# renders; anything else is replaced by "?".
# font = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
# bold_font = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"

[labels]
# Prefixes used by the plain text output and the cached news view.
title = "Title: "
date = "Date: "
link = "Link: "
image = "Image: "
content = "Content: "
separator = "--------------------------------------------------"
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
