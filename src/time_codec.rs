/*!
 * Conversion between subtitle time codes and fractional seconds.
 *
 * A [`TimeCode`] is the `HH:MM:SS,mmm` value carried by every caption.
 * Shifting happens in the seconds domain, so the codec provides both
 * directions plus the formatting used when the file is written back.
 */

use std::fmt;

// @const: Milliseconds per time unit
const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

// @const: Largest representable duration, in milliseconds
const MAX_TOTAL_MS: u64 = u32::MAX as u64 * MS_PER_HOUR + (MS_PER_HOUR - 1);

// Absorbs binary representation error (1.001 * 1000.0 == 1000.9999999999999)
// before the millisecond fraction is truncated.
const MS_TOLERANCE: f64 = 1e-6;

/// A caption time: hours, minutes, seconds and milliseconds.
///
/// Minutes and seconds always lie in `0..60` and milliseconds in `0..1000`.
/// Hours are not wrapped at 24 or 60; a shift past the last hour keeps
/// counting up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeCode {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub milliseconds: u16,
}

impl TimeCode {
    /// `00:00:00,000`
    pub const ZERO: TimeCode = TimeCode {
        hours: 0,
        minutes: 0,
        seconds: 0,
        milliseconds: 0,
    };

    /// Build a time code from components, carrying any overflow upwards.
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let total = hours as u64 * MS_PER_HOUR
            + minutes as u64 * MS_PER_MINUTE
            + seconds as u64 * MS_PER_SECOND
            + milliseconds as u64;
        Self::from_millis(total)
    }

    /// Decompose a millisecond count into carried components.
    pub fn from_millis(total_ms: u64) -> Self {
        let total_ms = total_ms.min(MAX_TOTAL_MS);
        TimeCode {
            hours: (total_ms / MS_PER_HOUR) as u32,
            minutes: ((total_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
            seconds: ((total_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
            milliseconds: (total_ms % MS_PER_SECOND) as u16,
        }
    }

    /// Total milliseconds represented by this time code.
    pub fn as_millis(&self) -> u64 {
        self.hours as u64 * MS_PER_HOUR
            + self.minutes as u64 * MS_PER_MINUTE
            + self.seconds as u64 * MS_PER_SECOND
            + self.milliseconds as u64
    }

    /// Fractional seconds represented by this time code.
    pub fn to_seconds(&self) -> f64 {
        to_seconds(
            self.hours,
            self.minutes as u32,
            self.seconds as u32,
            self.milliseconds as u32,
        )
    }

    /// Convert fractional seconds back into a time code.
    pub fn from_seconds(seconds: f64) -> Self {
        from_seconds(seconds)
    }

    /// Move this time code by `offset` seconds.
    ///
    /// Returns the shifted value and whether it had to be clamped at zero
    /// because the offset reached back past the start of the media.
    pub fn shifted(&self, offset: f64) -> (TimeCode, bool) {
        let target = self.to_seconds() + offset;
        // Decided in milliseconds so a shift landing on zero is not clamping
        let clamped = target.is_nan() || target * 1000.0 + MS_TOLERANCE < 0.0;
        (from_seconds(target), clamped)
    }
}

impl fmt::Display for TimeCode {
    /// SRT notation, `HH:MM:SS,mmm`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

/// `ms/1000 + s + m*60 + h*3600`
pub fn to_seconds(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> f64 {
    milliseconds as f64 / 1000.0 + seconds as f64 + minutes as f64 * 60.0 + hours as f64 * 3600.0
}

/// Split fractional seconds into hours, minutes, seconds and milliseconds.
///
/// The sub-millisecond remainder is truncated, not rounded. Negative and NaN
/// inputs clamp to [`TimeCode::ZERO`].
pub fn from_seconds(seconds: f64) -> TimeCode {
    if seconds.is_nan() || seconds <= 0.0 {
        return TimeCode::ZERO;
    }

    // `as` saturates, so infinite input lands on MAX_TOTAL_MS via from_millis
    let total_ms = (seconds * 1000.0 + MS_TOLERANCE).floor() as u64;
    TimeCode::from_millis(total_ms)
}
