//! Parsed day-log document.
//!
//! # Responsibility
//! - Hold the typed tree `Document -> DayBlock -> TimeRecord`.
//!
//! # Invariants
//! - Built only by `crate::parser`; there is no public constructor.
//! - Every `DayBlock` has at least one entry.
//! - `TimeRecord::end_absolute() > TimeRecord::start_absolute()`.
//! - Task text is trimmed and non-empty.

use crate::model::clock::{AbsoluteTime, ClockTime};
use crate::resolve::ResolvedInterval;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Calendar day of a day-block, parsed from `YYYY-MM-DD`.
///
/// Ordering is calendar order (year, month, day).
pub type CalendarDate = NaiveDate;

/// Ordered day-blocks of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    blocks: Vec<DayBlock>,
}

impl Document {
    pub(crate) fn new(blocks: Vec<DayBlock>) -> Self {
        Self { blocks }
    }

    /// Day-blocks in input order. Dates may repeat.
    pub fn blocks(&self) -> &[DayBlock] {
        &self.blocks
    }

    /// Total number of time records across all blocks.
    pub fn record_count(&self) -> usize {
        self.blocks.iter().map(|block| block.entries.len()).sum()
    }
}

/// One date line plus its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBlock {
    date: CalendarDate,
    entries: Vec<TimeRecord>,
}

impl DayBlock {
    pub(crate) fn new(date: CalendarDate, entries: Vec<TimeRecord>) -> Self {
        Self { date, entries }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Entries in input order.
    pub fn entries(&self) -> &[TimeRecord] {
        &self.entries
    }
}

/// Resolved interval with its task label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRecord {
    written_start: ClockTime,
    written_end: ClockTime,
    start_absolute: AbsoluteTime,
    end_absolute: AbsoluteTime,
    task: String,
}

impl TimeRecord {
    pub(crate) fn new(
        written_start: ClockTime,
        written_end: ClockTime,
        interval: ResolvedInterval,
        task: impl Into<String>,
    ) -> Self {
        Self {
            written_start,
            written_end,
            start_absolute: interval.start(),
            end_absolute: interval.end(),
            task: task.into(),
        }
    }

    /// Start time as written in the log.
    pub fn written_start(&self) -> ClockTime {
        self.written_start
    }

    /// End time as written in the log.
    pub fn written_end(&self) -> ClockTime {
        self.written_end
    }

    pub fn start_absolute(&self) -> AbsoluteTime {
        self.start_absolute
    }

    pub fn end_absolute(&self) -> AbsoluteTime {
        self.end_absolute
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    /// Exact, strictly positive elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.end_absolute.since(self.start_absolute)
    }
}
