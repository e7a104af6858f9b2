/*!
 * Error types for the srtshift application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Malformed caption segments are not errors: the transformer drops them and
 * reports them through the diagnostics sink instead.
 */

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a shift run
#[derive(Error, Debug)]
pub enum ShiftError {
    /// The original subtitle file could not be opened or read
    #[error("Cannot read subtitle file {path:?}: {source}")]
    InputAccess {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The output subtitle file could not be created or written
    #[error("Cannot write subtitle file {path:?}: {source}")]
    OutputAccess {
        /// Path of the output file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Input and output point at the same file
    #[error("Refusing to overwrite the input file in place: {0:?}")]
    InPlace(PathBuf),
}

/// Errors that can occur when handling the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid JSON for this program
    #[error("Failed to parse configuration file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be saved
    #[error("Failed to write configuration file {path:?}: {message}")]
    Write { path: PathBuf, message: String },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the shift run itself
    #[error("Shift error: {0}")]
    Shift(#[from] ShiftError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}
