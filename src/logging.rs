/*!
 * Global `log` backend for the srtshift binary.
 *
 * Warnings and errors go to stderr with color; every enabled record is also
 * appended to a size-rotated log file once one has been attached.
 */

use anyhow::{Context, Result};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

// @const: Logger name written into every file line
const LOGGER_NAME: &str = "srtshift";

static LOGGER: Lazy<ShiftLogger> = Lazy::new(ShiftLogger::new);

/// Install the global logger with the given maximum level
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&*LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Start appending records to `path`, rotating at `max_bytes`
pub fn attach_log_file<P: AsRef<Path>>(path: P, max_bytes: u64, backups: u32) -> Result<()> {
    let file = RotatingFile::open(path.as_ref(), max_bytes, backups)?;
    *LOGGER.file.lock() = Some(file);
    Ok(())
}

/// Change the maximum level after initialization
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Format one log file line, `YYYYMMDD-HH:MM:SS.mmm [name] [LEVEL   ] message`
pub fn format_file_line(timestamp: &chrono::DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "{} [{}] [{:<8}] {}",
        timestamp.format("%Y%m%d-%H:%M:%S%.3f"),
        LOGGER_NAME,
        level_name(level),
        message
    )
}

// Level names as they appear in the log file
fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

// @struct: Process-wide logger
struct ShiftLogger {
    file: Mutex<Option<RotatingFile>>,
}

impl ShiftLogger {
    fn new() -> Self {
        ShiftLogger {
            file: Mutex::new(None),
        }
    }

    // @returns: ANSI color for console output
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for ShiftLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = Local::now();
        let message = record.args().to_string();

        let mut file = self.file.lock();
        let has_file = file.is_some();
        if let Some(file) = file.as_mut() {
            let line = format_file_line(&now, record.level(), &message);
            if let Err(e) = file.write_line(&line) {
                let _ = writeln!(std::io::stderr(), "Failed to write log file: {}", e);
            }
        }
        drop(file);

        // Without a log file everything goes to the console
        if record.level() <= Level::Warn || !has_file {
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now.format("%H:%M:%S%.3f"),
                message
            );
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.file.flush();
        }
        let _ = std::io::stderr().flush();
    }
}

/// Append-only file that rolls over to numbered backups when full
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backups: u32,
}

impl RotatingFile {
    /// Open `path` for appending, creating parent directories as needed
    pub fn open(path: &Path, max_bytes: u64, backups: u32) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
        }

        let file = Self::open_append(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(RotatingFile {
            path: path.to_path_buf(),
            file,
            written,
            max_bytes,
            backups,
        })
    }

    /// Write one line, rotating first if it would overflow the file
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let len = line.len() as u64 + 1;
        if self.max_bytes > 0 && self.written > 0 && self.written + len > self.max_bytes {
            self.rotate()?;
        }

        writeln!(self.file, "{}", line)
            .with_context(|| format!("Failed to write to log file: {:?}", self.path))?;
        self.written += len;
        Ok(())
    }

    /// Path of backup number `index` (`srtshift.log.1`, ...)
    pub fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> Result<()> {
        self.file.flush()?;

        if self.backups == 0 {
            // No backups: start over in the same file
            self.file = File::create(&self.path)
                .with_context(|| format!("Failed to truncate log file: {:?}", self.path))?;
            self.written = 0;
            return Ok(());
        }

        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))
                    .with_context(|| format!("Failed to rotate log file: {:?}", from))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
            .with_context(|| format!("Failed to rotate log file: {:?}", self.path))?;

        self.file = Self::open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn open_append(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {:?}", path))
    }
}
