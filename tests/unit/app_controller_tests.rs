/*!
 * Tests for application controller functionality
 */

use anyhow::Result;
use std::fs;
use srtshift::app_config::Config;
use srtshift::app_controller::{Controller, PROGRAM_VERSION};
use srtshift::errors::{AppError, ShiftError};
use crate::common;

/// Test creating a controller with a specific configuration
#[test]
fn test_with_config_withValidConfig_shouldCreateController() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().debug_level, 20);
    assert!(!PROGRAM_VERSION.is_empty());
    Ok(())
}

/// Test that an invalid configuration is rejected
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let config = Config {
        log_file_size: 0,
        ..Config::default()
    };
    assert!(matches!(Controller::with_config(config), Err(AppError::Config(_))));
}

/// Test a full run on disk
#[test]
fn test_run_withValidFiles_shouldWriteShiftedOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = temp_dir.path().join("output.srt");

    let controller = Controller::with_config(Config::default())?;
    let report = controller.run(&input, &output, 1.5)?;

    assert_eq!(report.blocks_written, 3);
    assert_eq!(report.segments_skipped, 0);
    let written = fs::read_to_string(&output)?;
    assert!(written.starts_with("1\n00:00:02,500 --> 00:00:05,500\nThis is a test subtitle.\n\n"));
    assert!(written.ends_with("3\n00:00:11,500 --> 00:00:15,500\nFor testing purposes.\n\n"));

    // Input untouched
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_SRT);
    Ok(())
}

/// Test that a missing input is an input access error and writes nothing
#[test]
fn test_run_withMissingInput_shouldFailBeforeWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("missing.srt");
    let output = temp_dir.path().join("output.srt");

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run(&input, &output, 1.0);

    assert!(matches!(result, Err(AppError::Shift(ShiftError::InputAccess { .. }))));
    assert!(!output.exists());
    Ok(())
}

/// Test that an unwritable output is an output access error
#[test]
fn test_run_withOutputIntoAFile_shouldReportOutputAccess() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let blocker = common::create_test_file(temp_dir.path(), "not_a_dir", "")?;
    let output = blocker.join("output.srt");

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run(&input, &output, 1.0);

    assert!(matches!(result, Err(AppError::Shift(ShiftError::OutputAccess { .. }))));
    Ok(())
}

/// Test that the input cannot be overwritten in place
#[test]
fn test_run_withSameInputAndOutput_shouldRefuse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller.run(&input, &input, 1.0);

    assert!(matches!(result, Err(AppError::Shift(ShiftError::InPlace(_)))));
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_SRT);
    Ok(())
}

/// Test the in-memory pass
#[test]
fn test_shift_text_withSample_shouldShiftInMemory() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let output = controller.shift_text(common::SAMPLE_SRT, -1.0);

    assert!(output.text.starts_with("1\n00:00:00,000 --> 00:00:03,000\n"));
    assert_eq!(output.report.blocks_written, 3);
    assert_eq!(output.report.clamped_times, 0);
    Ok(())
}

/// Test that the shifted file gets the same mode as a plainly written file
#[cfg(unix)]
#[test]
fn test_run_withNewOutput_shouldMatchPlainWriteMode() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = temp_dir.path().join("shifted.srt");

    Controller::with_config(Config::default())?.run(&input, &output, 0.5)?;

    let mode = fs::metadata(&output)?.permissions().mode() & 0o777;
    assert_eq!(mode & 0o044, 0o044, "output mode {:o} is not readable by others", mode);
    Ok(())
}
