//! Date line grammar: `Digit{4} "-" Digit{2} "-" Digit{2}`.

use crate::model::document::CalendarDate;
use crate::parser::error::DateIssue;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid date line regex")
});

/// Parses one date line strictly; no surrounding whitespace is allowed.
pub(crate) fn parse_date_line(text: &str) -> Result<CalendarDate, DateIssue> {
    let caps = DATE_LINE_RE.captures(text).ok_or(DateIssue::Malformed)?;
    let field = |index: usize| caps.get(index).map(|m| m.as_str()).unwrap_or_default();

    let year = field(1).parse::<i32>().map_err(|_| DateIssue::Malformed)?;
    let month = field(2).parse::<u32>().map_err(|_| DateIssue::Malformed)?;
    let day = field(3).parse::<u32>().map_err(|_| DateIssue::Malformed)?;

    CalendarDate::from_ymd_opt(year, month, day).ok_or(DateIssue::InvalidCalendarDate)
}
