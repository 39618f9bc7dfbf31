//! Configuration loading and root folder resolution
//!
//! Configuration is bootstrap only: the TOML file is read once at startup
//! and the service must restart to pick up changes. Every key is optional
//! and a missing or unreadable file is not fatal.
//!
//! Lookup order for the file: `--config` argument, then
//! `<config_dir>/songbook/config.toml`, then (Linux) `/etc/songbook/config.toml`.
//!
//! # Root folder priority
//!
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `SONGBOOK_ROOT_FOLDER`
//! 3. TOML config file `root_folder`
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "SONGBOOK_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "songbook.db";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port (optional, see [`DEFAULT_PORT`])
    #[serde(default)]
    pub port: Option<u16>,

    /// HTTP bind address (optional, see [`DEFAULT_BIND`])
    #[serde(default)]
    pub bind: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the effective configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file found; built-in defaults
    NotFound,
    /// File exists but could not be used; built-in defaults
    Rejected(PathBuf, Error),
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults
    ///
    /// Uses `explicit` when given, otherwise the platform config file. A
    /// missing, unreadable or invalid file never prevents startup; the
    /// returned [`ConfigSource`] tells the caller what happened so it can be
    /// logged once logging is up.
    pub fn discover(explicit: Option<&Path>) -> (Self, ConfigSource) {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match config_file_path() {
                Ok(path) => path,
                Err(_) => return (Self::default(), ConfigSource::NotFound),
            },
        };

        match Self::load_from(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (Self::default(), ConfigSource::Rejected(path, e)),
        }
    }

    /// Effective HTTP port when no command-line/environment override is given
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Effective bind address when no command-line/environment override is given
    pub fn bind_or_default(&self) -> String {
        self.bind.clone().unwrap_or_else(|| DEFAULT_BIND.to_string())
    }
}

/// Resolve the root folder following the documented priority order
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Database file location inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

/// Locate the platform configuration file
///
/// Linux checks `~/.config/songbook/config.toml` then
/// `/etc/songbook/config.toml`; other platforms use the user config dir only.
pub fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("songbook").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/songbook/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\songbook
        dirs::data_local_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\songbook"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/songbook
        dirs::data_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/songbook"))
    } else {
        // ~/.local/share/songbook (or /var/lib/songbook without a home)
        dirs::data_local_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/songbook"))
    }
}
