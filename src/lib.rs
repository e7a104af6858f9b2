/*!
 * # srtshift - SubRip subtitle time shifter
 *
 * A Rust library and command line tool that moves every caption of a
 * SubRip (`.srt`) file by a fixed number of seconds.
 *
 * ## Features
 *
 * - Positive offsets delay captions, negative offsets advance them
 * - Millisecond-exact timestamp arithmetic with correct carrying
 * - Malformed segments are dropped without failing the run
 * - Caption text passes through untouched
 * - Atomic output writes
 * - JSON configuration with a rotating log file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `time_codec`: Conversion between time codes and fractional seconds
 * - `subtitle_processor`: Segment parsing and shifting
 * - `diagnostics`: Event sink injected into the shifter
 * - `app_controller`: Read, shift, write orchestration
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `logging`: Global log backend used by the binary
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod diagnostics;
pub mod errors;
pub mod file_utils;
pub mod logging;
pub mod subtitle_processor;
pub mod time_codec;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use diagnostics::{DiagnosticsSink, LogSink, NullSink};
pub use errors::{AppError, ConfigError, ShiftError};
pub use subtitle_processor::{CaptionBlock, ShiftOutput, ShiftReport, SubtitleShifter, shift_subtitles};
pub use time_codec::{TimeCode, from_seconds, to_seconds};
