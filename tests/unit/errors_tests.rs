/*!
 * Tests for error types and conversions
 */

use std::io;
use std::path::PathBuf;
use srtshift::errors::{AppError, ConfigError, ShiftError};

#[test]
fn test_shiftError_inputAccess_shouldNamePathAndCause() {
    let error = ShiftError::InputAccess {
        path: PathBuf::from("movie.srt"),
        source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
    };
    let display = format!("{}", error);
    assert!(display.contains("Cannot read subtitle file"));
    assert!(display.contains("movie.srt"));
    assert!(display.contains("No such file"));
}

#[test]
fn test_shiftError_outputAccess_shouldNamePathAndCause() {
    let error = ShiftError::OutputAccess {
        path: PathBuf::from("/readonly/out.srt"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
    };
    let display = format!("{}", error);
    assert!(display.contains("Cannot write subtitle file"));
    assert!(display.contains("out.srt"));
    assert!(display.contains("Permission denied"));
}

#[test]
fn test_shiftError_source_shouldExposeIoError() {
    use std::error::Error;

    let error = ShiftError::InputAccess {
        path: PathBuf::from("x.srt"),
        source: io::Error::new(io::ErrorKind::NotFound, "gone"),
    };
    let source = error.source().expect("source should be set");
    assert_eq!(source.to_string(), "gone");
}

#[test]
fn test_appError_fromShiftError_shouldWrapCorrectly() {
    let app_error: AppError = ShiftError::InPlace(PathBuf::from("a.srt")).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Shift error"));
    assert!(display.contains("in place"));
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let app_error: AppError = ConfigError::Invalid("LogFileSize must be greater than zero".to_string()).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Config error"));
    assert!(display.contains("LogFileSize"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::File("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("File"));
}
