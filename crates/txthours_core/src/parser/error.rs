//! Parse error taxonomy.
//!
//! Every failure aborts the whole document. Errors carry the 1-based line
//! number in the caller's original text so the first problem can be located.

use crate::model::clock::ClockTimeError;
use crate::resolve::TimeRangeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Coarse error category, stable for callers and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Structural,
    DateFormat,
    TimeFormat,
    TimeRange,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::DateFormat => "date_format",
            Self::TimeFormat => "time_format",
            Self::TimeRange => "time_range",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block-splitting problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIssue {
    /// Input is empty or whitespace only.
    EmptyDocument,
    /// Two blank lines in a row leave a block with no lines.
    EmptyDayBlock,
    /// A date line with no entry lines under it.
    MissingEntries { date: String },
}

/// Date line problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateIssue {
    /// Not `YYYY-MM-DD`.
    Malformed,
    /// Right shape, impossible calendar value (e.g. month 13).
    InvalidCalendarDate,
}

/// Time entry line problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryIssue {
    MissingTimeSeparator,
    MissingTaskSeparator,
    MalformedTime(String),
    /// The `??` end-time placeholder was never replaced.
    Placeholder,
    Clock(ClockTimeError),
    EmptyTask,
}

impl From<ClockTimeError> for EntryIssue {
    fn from(value: ClockTimeError) -> Self {
        Self::Clock(value)
    }
}

impl Display for EntryIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTimeSeparator => {
                write!(f, "missing ` - ` between the start and end times")
            }
            Self::MissingTaskSeparator => {
                write!(f, "missing ` : ` between the end time and the task")
            }
            Self::MalformedTime(value) => {
                write!(f, "`{value}` is not a time in H:MM or HH:MM format")
            }
            Self::Placeholder => write!(f, "the `??` placeholder time was never replaced"),
            Self::Clock(err) => write!(f, "{err}"),
            Self::EmptyTask => write!(f, "task text must not be empty"),
        }
    }
}

/// Single opaque failure of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Structural {
        line: usize,
        issue: StructuralIssue,
    },
    DateFormat {
        line: usize,
        text: String,
        issue: DateIssue,
    },
    TimeFormat {
        line: usize,
        issue: EntryIssue,
    },
    TimeRange {
        line: usize,
        source: TimeRangeError,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Structural { .. } => ErrorKind::Structural,
            Self::DateFormat { .. } => ErrorKind::DateFormat,
            Self::TimeFormat { .. } => ErrorKind::TimeFormat,
            Self::TimeRange { .. } => ErrorKind::TimeRange,
        }
    }

    /// 1-based line number in the original input.
    pub fn line(&self) -> usize {
        match self {
            Self::Structural { line, .. }
            | Self::DateFormat { line, .. }
            | Self::TimeFormat { line, .. }
            | Self::TimeRange { line, .. } => *line,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: ", self.line())?;
        match self {
            Self::Structural { issue, .. } => match issue {
                StructuralIssue::EmptyDocument => write!(f, "document is empty"),
                StructuralIssue::EmptyDayBlock => write!(
                    f,
                    "empty day block; separate day blocks with exactly one blank line"
                ),
                StructuralIssue::MissingEntries { date } => {
                    write!(f, "day block {date} has no time entries")
                }
            },
            Self::DateFormat { text, issue, .. } => match issue {
                DateIssue::Malformed => {
                    write!(f, "`{text}` is not a date in YYYY-MM-DD format")
                }
                DateIssue::InvalidCalendarDate => {
                    write!(f, "`{text}` is not a valid calendar date")
                }
            },
            Self::TimeFormat { issue, .. } => write!(f, "invalid time entry: {issue}"),
            Self::TimeRange { source, .. } => write!(f, "{source}"),
        }
    }
}

// Display already renders the nested range or clock error, so no `source`.
impl Error for ParseError {}
