// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};

use srtshift::app_config::{Config, LogLevel};
use srtshift::app_controller::{Controller, PROGRAM_VERSION};
use srtshift::logging;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtshift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtshift - Subtitle file (srt) time shift program
///
/// Moves every caption of a SubRip file by a fixed number of seconds and
/// writes the result to a new file.
#[derive(Parser, Debug)]
#[command(name = "srtshift")]
#[command(about = "Subtitle file (srt) time shift program")]
#[command(disable_version_flag = true)]
#[command(long_about = "srtshift moves every caption of a SubRip (.srt) file by a fixed offset.

EXAMPLES:
    srtshift -c srtshift.json -s movie.srt -a 2.5             # Delay captions by 2.5s into output.srt
    srtshift -c srtshift.json -s movie.srt -o fixed.srt -a -1 # Show captions one second earlier
    srtshift -c srtshift.json -s movie.srt -l debug -a 0.3    # Trace every caption in the log file
    srtshift completions bash > srtshift.bash                 # Generate bash completions

CONFIGURATION:
    The JSON configuration file holds the log verbosity (DebugLevel), the log
    file size before rotation (LogFileSize) and the number of rotated logs to
    keep (LogBackups). A missing or outdated file is (re)written with defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Json configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Original subtitle file
    #[arg(short, long, value_name = "SUBS")]
    subs: Option<PathBuf>,

    /// Output subtitle file
    #[arg(short, long, value_name = "OUTFILE", default_value = "output.srt")]
    outfile: PathBuf,

    /// Adjustment seconds (+ve is delay)
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = parse_offset
    )]
    adjust: f64,

    /// Override the configured logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Program version
    #[arg(short = 'v', long)]
    version: bool,
}

/// Accept any finite number of seconds, negative included
fn parse_offset(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !seconds.is_finite() {
        return Err(format!("'{}' is not a finite number of seconds", value));
    }
    Ok(seconds)
}

fn main() -> Result<()> {
    // Console-only logging until the configuration names a log file
    logging::init(LevelFilter::Info).context("Failed to initialize logger")?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtshift", &mut std::io::stdout());
        return Ok(());
    }

    // Only show version and don't do anything else
    if cli.version {
        println!("Program version : {}", PROGRAM_VERSION);
        return Ok(());
    }

    let Some(config_path) = cli.config else {
        println!("Specify a json configuration file.");
        return Ok(());
    };

    let Some(subs) = cli.subs else {
        println!("Specify an original subtitles file to time shift.");
        return Ok(());
    };

    run_shift(
        &config_path,
        &subs,
        &cli.outfile,
        cli.adjust,
        cli.log_level.map(LogLevel::from),
    )
}

fn run_shift(
    config_path: &Path,
    subs: &Path,
    outfile: &Path,
    adjust: f64,
    log_level: Option<LogLevel>,
) -> Result<()> {
    if !adjust.is_finite() {
        bail!("Adjustment must be a finite number of seconds, got {}", adjust);
    }

    let mut config = Config::load_or_create(config_path);
    if let Some(level) = log_level {
        config.debug_level = level.to_debug_level();
    }

    config.validate().context("Configuration validation failed")?;

    logging::set_level(config.level_filter());
    logging::attach_log_file(&config.log_file, config.log_file_size, config.log_backups)
        .with_context(|| format!("Failed to open log file: {}", config.log_file))?;

    let controller = Controller::with_config(config)?;
    let report = controller
        .run(subs, outfile, adjust)
        .with_context(|| format!("Failed to shift subtitles from {:?}", subs))?;

    info!("Finished: {}", report);
    log::logger().flush();

    Ok(())
}
