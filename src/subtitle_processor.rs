use log::Level;
use std::fmt;

use crate::diagnostics::DiagnosticsSink;
use crate::time_codec::TimeCode;

// @module: Subtitle block parsing and shifting

// @const: Separator between start and end time on the timestamp line
const TIME_SEPARATOR: &[u8] = b" --> ";

// @const: Byte length of one `HH:MM:SS,mmm` field
const TIME_CODE_LEN: usize = 12;

// @const: Byte length of a full timestamp line
const TIMESTAMP_LINE_LEN: usize = 2 * TIME_CODE_LEN + TIME_SEPARATOR.len();

// @struct: Single caption parsed from one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionBlock {
    // @field: Caption ID, kept exactly as written
    pub id: String,

    // @field: Display start
    pub start: TimeCode,

    // @field: Display end
    pub end: TimeCode,

    // @field: Caption text, lines joined by '\n'
    pub body: String,
}

impl CaptionBlock {
    /// Creates a new caption block
    pub fn new(id: impl Into<String>, start: TimeCode, end: TimeCode, body: impl Into<String>) -> Self {
        CaptionBlock {
            id: id.into(),
            start,
            end,
            body: body.into(),
        }
    }

    /// Returns a copy moved by `offset` seconds and how many of its two
    /// times were clamped at zero.
    pub fn shifted(&self, offset: f64) -> (CaptionBlock, usize) {
        let (start, start_clamped) = self.start.shifted(offset);
        let (end, end_clamped) = self.end.shifted(offset);
        let block = CaptionBlock {
            id: self.id.clone(),
            start,
            end,
            body: self.body.clone(),
        };
        (block, start_clamped as usize + end_clamped as usize)
    }

    /// Format the `HH:MM:SS,mmm --> HH:MM:SS,mmm` line
    pub fn timestamp_line(&self) -> String {
        format!("{} --> {}", self.start, self.end)
    }
}

impl fmt::Display for CaptionBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.body)?;
        writeln!(f)
    }
}

/// Why a segment produced no caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No line consisting only of digits
    MissingId,
    /// ID found, but no valid `HH:MM:SS,mmm --> HH:MM:SS,mmm` line after it
    MissingTimestamp,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "no caption ID"),
            Self::MissingTimestamp => write!(f, "no valid timestamp line"),
        }
    }
}

/// Counters describing one shift pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReport {
    /// Captions written to the output
    pub blocks_written: usize,
    /// Segments dropped as malformed
    pub segments_skipped: usize,
    /// Start or end times that would have gone negative
    pub clamped_times: usize,
}

impl fmt::Display for ShiftReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} caption(s) written, {} segment(s) skipped, {} time(s) clamped",
            self.blocks_written, self.segments_skipped, self.clamped_times
        )
    }
}

/// Result of a shift pass: the new file content and its report
#[derive(Debug, Clone)]
pub struct ShiftOutput {
    pub text: String,
    pub report: ShiftReport,
}

// Per-segment scanner. Each variant carries what has been found so far.
enum ScanState<'a> {
    SeekId,
    SeekTimestamp {
        id: &'a str,
    },
    CollectBody {
        id: &'a str,
        start: TimeCode,
        end: TimeCode,
        body: Vec<&'a str>,
    },
}

/// Shifts every caption of a SubRip document by a fixed number of seconds
pub struct SubtitleShifter<S: DiagnosticsSink> {
    // @field: Seconds added to every time, negative moves captions earlier
    offset: f64,

    // @field: Where trace and skip events go
    sink: S,
}

impl<S: DiagnosticsSink> SubtitleShifter<S> {
    /// Create a shifter reporting to `sink`
    pub fn new(offset: f64, sink: S) -> Self {
        SubtitleShifter { offset, sink }
    }

    /// Offset in seconds
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Shift a whole document.
    ///
    /// Segments without an ID or without a timestamp line are dropped and
    /// counted in the report; they never fail the pass.
    pub fn shift(&self, content: &str) -> ShiftOutput {
        let mut text = String::with_capacity(content.len() + content.len() / 8);
        let mut report = ShiftReport::default();

        for (index, segment) in split_segments(content).iter().enumerate() {
            let block = match parse_segment(segment) {
                Ok(block) => block,
                Err(reason) => {
                    self.sink.record(
                        Level::Debug,
                        format_args!(
                            "Skipping segment {} ({}): {:?}",
                            index + 1,
                            reason,
                            segment.first().copied().unwrap_or_default()
                        ),
                    );
                    report.segments_skipped += 1;
                    continue;
                }
            };

            let (shifted, clamped) = self.shift_block(&block);
            report.clamped_times += clamped;
            report.blocks_written += 1;

            text.push_str(&shifted.to_string());
        }

        self.sink.record(Level::Info, format_args!("Shift complete: {}", report));

        ShiftOutput { text, report }
    }

    fn shift_block(&self, block: &CaptionBlock) -> (CaptionBlock, usize) {
        self.sink.record(Level::Debug, format_args!("Subtitle ID : {}", block.id));
        self.sink.record(Level::Debug, format_args!("Timestamp : {}", block.timestamp_line()));
        self.sink.record(
            Level::Debug,
            format_args!(
                "FROM {:.3}s TO {:.3}s",
                block.start.to_seconds(),
                block.end.to_seconds()
            ),
        );

        let (shifted, clamped) = block.shifted(self.offset);
        if clamped > 0 {
            self.sink.record(
                Level::Warn,
                format_args!(
                    "Caption {} shifted by {}s reaches before 00:00:00,000, clamped to {}",
                    block.id,
                    self.offset,
                    shifted.timestamp_line()
                ),
            );
        }

        self.sink.record(Level::Debug, format_args!("New timestamp : {}", shifted.timestamp_line()));
        self.sink.record(Level::Debug, format_args!("Subtitle text : {}", shifted.body));

        (shifted, clamped)
    }
}

/// Shift `content` by `offset` seconds in a single pass.
pub fn shift_subtitles<S: DiagnosticsSink>(content: &str, offset: f64, sink: S) -> ShiftOutput {
    SubtitleShifter::new(offset, sink).shift(content)
}

/// Parse every well-formed caption, dropping malformed segments.
pub fn parse_blocks(content: &str) -> Vec<CaptionBlock> {
    split_segments(content)
        .iter()
        .filter_map(|segment| parse_segment(segment).ok())
        .collect()
}

/// Split text into segments at runs of blank (whitespace-only) lines.
///
/// Both `\n` and `\r\n` end a line. Leading and trailing blank lines
/// produce no segment.
pub fn split_segments(content: &str) -> Vec<Vec<&str>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Extract one caption from the lines of a segment.
///
/// The first digits-only line is the ID; the first valid timestamp line
/// after it starts the body, which runs to the end of the segment. Lines
/// skipped while seeking are discarded.
pub fn parse_segment(lines: &[&str]) -> Result<CaptionBlock, SkipReason> {
    let mut state = ScanState::SeekId;

    for &line in lines {
        state = match state {
            ScanState::SeekId => {
                if is_caption_id(line) {
                    ScanState::SeekTimestamp { id: line }
                } else {
                    ScanState::SeekId
                }
            }
            ScanState::SeekTimestamp { id } => match parse_timestamp_line(line) {
                Some((start, end)) => ScanState::CollectBody {
                    id,
                    start,
                    end,
                    body: Vec::new(),
                },
                None => ScanState::SeekTimestamp { id },
            },
            ScanState::CollectBody { id, start, end, mut body } => {
                body.push(line);
                ScanState::CollectBody { id, start, end, body }
            }
        };
    }

    match state {
        ScanState::SeekId => Err(SkipReason::MissingId),
        ScanState::SeekTimestamp { .. } => Err(SkipReason::MissingTimestamp),
        ScanState::CollectBody { id, start, end, body } => {
            Ok(CaptionBlock::new(id, start, end, body.join("\n")))
        }
    }
}

/// A caption ID line is one or more ASCII digits and nothing else
pub fn is_caption_id(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a full `HH:MM:SS,mmm --> HH:MM:SS,mmm` line.
///
/// Hours, minutes and seconds must be two digits with the first in `0-5`;
/// milliseconds exactly three digits. Nothing else may be on the line.
pub fn parse_timestamp_line(line: &str) -> Option<(TimeCode, TimeCode)> {
    let b = line.as_bytes();
    if b.len() != TIMESTAMP_LINE_LEN {
        return None;
    }

    let (start, rest) = b.split_at(TIME_CODE_LEN);
    let (separator, end) = rest.split_at(TIME_SEPARATOR.len());
    if separator != TIME_SEPARATOR {
        return None;
    }

    Some((parse_time_code(start)?, parse_time_code(end)?))
}

fn parse_time_code(b: &[u8]) -> Option<TimeCode> {
    if b.len() != TIME_CODE_LEN {
        return None;
    }

    let mut valid = matches!(b[0], b'0'..=b'5');
    valid &= b[1].is_ascii_digit();
    valid &= matches!(b[2], b':');
    valid &= matches!(b[3], b'0'..=b'5');
    valid &= b[4].is_ascii_digit();
    valid &= matches!(b[5], b':');
    valid &= matches!(b[6], b'0'..=b'5');
    valid &= b[7].is_ascii_digit();
    valid &= matches!(b[8], b',');
    valid &= b[9].is_ascii_digit();
    valid &= b[10].is_ascii_digit();
    valid &= b[11].is_ascii_digit();
    if !valid {
        return None;
    }

    let digit = |i: usize| (b[i] - b'0') as u32;
    Some(TimeCode::new(
        digit(0) * 10 + digit(1),
        digit(3) * 10 + digit(4),
        digit(6) * 10 + digit(7),
        digit(9) * 100 + digit(10) * 10 + digit(11),
    ))
}
