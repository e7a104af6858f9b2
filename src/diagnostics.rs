use log::Level;
use std::fmt;

// @module: Diagnostics channel for the subtitle transformer

// @const: Log target used by LogSink
pub const SHIFT_TARGET: &str = "srtshift::shift";

/// Receiver for events raised while subtitles are being shifted.
///
/// The transformer never writes log files itself; the caller decides where
/// events go by passing a sink in.
pub trait DiagnosticsSink {
    /// Record one event at the given level
    fn record(&self, level: Level, args: fmt::Arguments<'_>);
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for &T {
    fn record(&self, level: Level, args: fmt::Arguments<'_>) {
        (**self).record(level, args)
    }
}

// @struct: Sink forwarding to the global `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn record(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: SHIFT_TARGET, level, "{}", args);
    }
}

// @struct: Sink discarding every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}
