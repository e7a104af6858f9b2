use log::{debug, info};
use std::path::Path;

use crate::app_config::Config;
use crate::diagnostics::LogSink;
use crate::errors::{AppError, ShiftError};
use crate::file_utils::FileManager;
use crate::subtitle_processor::{ShiftOutput, ShiftReport, SubtitleShifter};

// @module: Application controller for subtitle shifting

// @const: Program version logged at the start of every run
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main application controller: read, shift, write
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shift `input_file` by `offset` seconds and write the result to
    /// `output_file`.
    ///
    /// The whole input is read and transformed before the output is
    /// touched. Malformed segments are dropped, not reported as errors.
    pub fn run<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        output_file: P2,
        offset: f64,
    ) -> Result<ShiftReport, AppError> {
        let input_file = input_file.as_ref();
        let output_file = output_file.as_ref();

        info!("Program version : {}", PROGRAM_VERSION);
        info!("Adjusting timing by secs : {:.6}", offset);

        if FileManager::is_same_file(input_file, output_file) {
            return Err(ShiftError::InPlace(input_file.to_path_buf()).into());
        }

        info!("Attempting to open subtitle file : {:?}", input_file);
        let content = FileManager::read_to_string(input_file).map_err(|source| ShiftError::InputAccess {
            path: input_file.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes", content.len());

        let output = self.shift_text(&content, offset);

        info!("Attempting to write subtitle file : {:?}", output_file);
        FileManager::write_atomic(output_file, &output.text).map_err(|source| ShiftError::OutputAccess {
            path: output_file.to_path_buf(),
            source,
        })?;

        info!("Success: {:?} ({})", output_file, output.report);
        Ok(output.report)
    }

    /// Shift subtitle text held in memory
    pub fn shift_text(&self, content: &str, offset: f64) -> ShiftOutput {
        SubtitleShifter::new(offset, LogSink).shift(content)
    }
}
