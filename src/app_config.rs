use log::{LevelFilter, debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::default::Default;
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading, upgrading, validating and saving the JSON
/// configuration file. Fields use the file's PascalCase key names.
pub const CONFIG_VERSION: u32 = 1;

// @const: Keys every current configuration file must carry
const REQUIRED_KEYS: [&str; 4] = ["ConfigVersion", "DebugLevel", "LogFileSize", "LogBackups"];

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Version of the configuration layout
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Numeric verbosity: 10 debug, 20 info, 30 warning, 40 error, 50 critical
    #[serde(default = "default_debug_level")]
    pub debug_level: u32,

    /// Log file size in bytes before it is rotated
    #[serde(default = "default_log_file_size")]
    pub log_file_size: u64,

    /// Number of rotated log files to keep
    #[serde(default = "default_log_backups")]
    pub log_backups: u32,

    /// Log file location
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Numeric verbosity stored in the config file
    pub fn to_debug_level(self) -> u32 {
        match self {
            Self::Error => 40,
            Self::Warn => 30,
            Self::Info => 20,
            Self::Debug => 10,
            Self::Trace => 5,
        }
    }

    // @returns: Matching log facade filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }

    /// Map a numeric threshold onto the most verbose level it still lets
    /// through (15 admits info and above, so it maps to Info)
    pub fn from_debug_level(debug_level: u32) -> Self {
        match debug_level {
            0..=9 => Self::Trace,
            10 => Self::Debug,
            11..=20 => Self::Info,
            21..=30 => Self::Warn,
            _ => Self::Error,
        }
    }
}

fn default_config_version() -> u32 {
    CONFIG_VERSION
}

fn default_debug_level() -> u32 {
    20
}

fn default_log_file_size() -> u64 {
    100_000
}

fn default_log_backups() -> u32 {
    3
}

fn default_log_file() -> String {
    "srtshift.log".to_string()
}

impl Config {
    /// Load the configuration at `path`, repairing the file when needed.
    ///
    /// A missing or unparseable file is replaced by the defaults. An older
    /// `ConfigVersion` or a missing key rewrites the file with the values
    /// that could be read plus defaults for the rest. Failing to write the
    /// repaired file is logged, not returned.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let (config, needs_save) = match Self::read(path) {
            Ok((config, missing_keys)) => {
                let outdated = config.config_version != CONFIG_VERSION;
                if outdated {
                    warn!("Upgrading configuration file: {:?}", path);
                }
                if !missing_keys.is_empty() {
                    warn!(
                        "Configuration file is missing {}, saving defaults for them",
                        missing_keys.join(", ")
                    );
                }
                let config = Config {
                    config_version: CONFIG_VERSION,
                    ..config
                };
                (config, outdated || !missing_keys.is_empty())
            }
            Err(e) => {
                warn!("Error opening configuration file ({}), saving default configuration data", e);
                (Config::default(), true)
            }
        };

        if needs_save {
            if let Err(e) = config.save(path) {
                warn!("{}", e);
            }
        }

        config
    }

    /// Read and parse a configuration file, returning the keys it lacks
    pub fn read<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<&'static str>), ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let missing_keys = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| value.get(*key).is_none())
            .collect();

        let config = serde_json::from_value(value).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded configuration from {:?}", path);
        Ok((config, missing_keys))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_error = |message: String| ConfigError::Write {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| write_error(e.to_string()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_file_size == 0 {
            return Err(ConfigError::Invalid("LogFileSize must be greater than zero".to_string()));
        }

        if self.log_file.trim().is_empty() {
            return Err(ConfigError::Invalid("LogFile must not be empty".to_string()));
        }

        Ok(())
    }

    /// Verbosity as a log level
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_debug_level(self.debug_level)
    }

    /// Verbosity as a log facade filter
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level().to_level_filter()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            config_version: CONFIG_VERSION,
            debug_level: default_debug_level(),
            log_file_size: default_log_file_size(),
            log_backups: default_log_backups(),
            log_file: default_log_file(),
        }
    }
}
