//! Configuration loading and data file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the backing CSV file
pub const DATA_FILE_ENV: &str = "MATPRICE_DATA_FILE";

/// Default HTTP port for the UI server
pub const DEFAULT_PORT: u16 = 5790;

/// Default log filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DATA_FILE_NAME: &str = "materials.csv";
const APP_DIR: &str = "matprice";

/// Optional settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Backing CSV file
    pub data_file: Option<PathBuf>,
    pub port: Option<u16>,
    /// tracing filter directive, e.g. "debug" or "matprice_ui=debug"
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Where the data file path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    ConfigFile,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigSource::CommandLine => "command line",
            ConfigSource::Environment => "environment",
            ConfigSource::ConfigFile => "config file",
            ConfigSource::Default => "default",
        };
        f.write_str(s)
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub data_file_source: ConfigSource,
    pub port: u16,
    pub log_level: String,
    /// Set when a config file existed but could not be read; defaults were used
    pub config_warning: Option<String>,
}

/// Resolves configuration in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_data_file: Option<PathBuf>,
    cli_port: Option<u16>,
    config_file: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        self.cli_data_file = path;
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.cli_port = port;
        self
    }

    /// Use this TOML file instead of the platform default location
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn resolve(&self) -> AppConfig {
        let (toml, config_warning) = self.load_toml();

        let (data_file, data_file_source) = if let Some(path) = &self.cli_data_file {
            (path.clone(), ConfigSource::CommandLine)
        } else if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            (PathBuf::from(path), ConfigSource::Environment)
        } else if let Some(path) = &toml.data_file {
            (path.clone(), ConfigSource::ConfigFile)
        } else {
            (default_data_file(), ConfigSource::Default)
        };

        AppConfig {
            data_file,
            data_file_source,
            port: self.cli_port.or(toml.port).unwrap_or(DEFAULT_PORT),
            log_level: toml
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            config_warning,
        }
    }

    /// Missing config files are normal; unreadable ones fall back to defaults
    fn load_toml(&self) -> (TomlConfig, Option<String>) {
        let path = match &self.config_file {
            Some(path) => path.clone(),
            None => match default_config_path() {
                Some(path) => path,
                None => return (TomlConfig::default(), None),
            },
        };

        if !path.exists() {
            if self.config_file.is_some() {
                return (
                    TomlConfig::default(),
                    Some(format!("Config file not found: {}", path.display())),
                );
            }
            return (TomlConfig::default(), None);
        }

        match TomlConfig::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (TomlConfig::default(), Some(e.to_string())),
        }
    }
}

/// Platform config file location, e.g. `~/.config/matprice/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// OS-dependent default location of the backing CSV file
pub fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR).join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}
