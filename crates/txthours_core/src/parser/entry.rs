//! Time entry line grammar: `Time " - " Time " : " TaskText`.

use crate::model::clock::ClockTime;
use crate::parser::error::EntryIssue;
use once_cell::sync::Lazy;
use regex::Regex;

const TIME_SEPARATOR: &str = " - ";
const TASK_SEPARATOR: &str = " : ";
const PLACEHOLDER: &str = "??";

static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("valid clock time regex"));

/// Syntactically valid entry line, before AM/PM resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryLine<'a> {
    pub start: ClockTime,
    pub end: ClockTime,
    pub task: &'a str,
}

/// Parses one entry line.
///
/// The first ` - ` ends the start time and the first ` : ` after it ends the
/// end time; everything after that is task text, so task text may itself
/// contain either separator.
pub(crate) fn parse_entry_line(text: &str) -> Result<EntryLine<'_>, EntryIssue> {
    let (start_text, rest) = text
        .split_once(TIME_SEPARATOR)
        .ok_or(EntryIssue::MissingTimeSeparator)?;

    let (end_text, task_text) = match rest.split_once(TASK_SEPARATOR) {
        Some(parts) => parts,
        // `9:00 - 9:20 :` has the separator minus its trailing space.
        None => match rest.trim_end().strip_suffix(" :") {
            Some(end_text) => (end_text, ""),
            None => return Err(EntryIssue::MissingTaskSeparator),
        },
    };

    let start = parse_clock_time(start_text)?;
    let end = parse_clock_time(end_text)?;

    let task = task_text.trim();
    if task.is_empty() {
        return Err(EntryIssue::EmptyTask);
    }

    Ok(EntryLine { start, end, task })
}

fn parse_clock_time(text: &str) -> Result<ClockTime, EntryIssue> {
    if text.trim() == PLACEHOLDER {
        return Err(EntryIssue::Placeholder);
    }

    let caps = CLOCK_TIME_RE
        .captures(text)
        .ok_or_else(|| EntryIssue::MalformedTime(text.to_string()))?;
    let hour = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .ok_or_else(|| EntryIssue::MalformedTime(text.to_string()))?;
    let minute = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .ok_or_else(|| EntryIssue::MalformedTime(text.to_string()))?;

    Ok(ClockTime::new(hour, minute)?)
}
