//! Structural parser for day-log documents.
//!
//! # Responsibility
//! - Turn raw text into a typed `Document` or exactly one `ParseError`.
//! - Resolve each entry's AM/PM through `crate::resolve` while parsing.
//!
//! # Invariants
//! - The document is trimmed before splitting; blocks are separated by one
//!   blank line (whitespace-only lines count as blank).
//! - `\r\n` line endings are treated as `\n`.
//! - Parsing stops at the first problem; no partial `Document` escapes.
//! - Reported line numbers refer to the caller's untrimmed text.
//!
//! Grammar:
//! ```text
//! File      := DayBlock ("\n\n" DayBlock)*
//! DayBlock  := Date "\n" TimeEntry ("\n" TimeEntry)*
//! Date      := Digit{4} "-" Digit{2} "-" Digit{2}
//! TimeEntry := Time " - " Time " : " TaskText
//! Time      := Digit{1,2} ":" Digit{2}
//! ```

mod date;
mod entry;
pub mod error;

use crate::model::document::{DayBlock, Document, TimeRecord};
use crate::resolve::resolve;
use date::parse_date_line;
use entry::parse_entry_line;
pub use error::{DateIssue, EntryIssue, ErrorKind, ParseError, StructuralIssue};

/// One physical line and its 1-based number in the original input.
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

impl SourceLine<'_> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Parses a whole day-log document.
///
/// # Errors
/// Returns the first structural, date, time-format or time-range problem.
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    let lines = source_lines(text);
    if lines.is_empty() {
        return Err(ParseError::Structural {
            line: 1,
            issue: StructuralIssue::EmptyDocument,
        });
    }

    let blocks = split_day_blocks(&lines)?
        .into_iter()
        .map(parse_day_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Document::new(blocks))
}

/// Numbers the lines of the trimmed document against the untrimmed input.
fn source_lines(text: &str) -> Vec<SourceLine<'_>> {
    let without_leading = text.trim_start();
    let skipped = &text[..text.len() - without_leading.len()];
    let first_number = skipped.matches('\n').count() + 1;

    let trimmed = without_leading.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed
        .split('\n')
        .enumerate()
        .map(|(index, raw)| SourceLine {
            number: first_number + index,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        })
        .collect()
}

fn split_day_blocks<'l, 'a>(
    lines: &'l [SourceLine<'a>],
) -> Result<Vec<&'l [SourceLine<'a>]>, ParseError> {
    let mut blocks = Vec::new();
    let mut block_start = 0;

    for (index, line) in lines.iter().enumerate() {
        if !line.is_blank() {
            continue;
        }
        if index == block_start {
            return Err(ParseError::Structural {
                line: line.number,
                issue: StructuralIssue::EmptyDayBlock,
            });
        }
        blocks.push(&lines[block_start..index]);
        block_start = index + 1;
    }

    // Trimming guarantees the final line is not blank.
    blocks.push(&lines[block_start..]);
    Ok(blocks)
}

fn parse_day_block(lines: &[SourceLine<'_>]) -> Result<DayBlock, ParseError> {
    let Some((date_line, entry_lines)) = lines.split_first() else {
        return Err(ParseError::Structural {
            line: 1,
            issue: StructuralIssue::EmptyDayBlock,
        });
    };

    let date = parse_date_line(date_line.text).map_err(|issue| ParseError::DateFormat {
        line: date_line.number,
        text: date_line.text.to_string(),
        issue,
    })?;

    if entry_lines.is_empty() {
        return Err(ParseError::Structural {
            line: date_line.number,
            issue: StructuralIssue::MissingEntries {
                date: date.to_string(),
            },
        });
    }

    let entries = entry_lines
        .iter()
        .map(parse_time_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayBlock::new(date, entries))
}

fn parse_time_record(line: &SourceLine<'_>) -> Result<TimeRecord, ParseError> {
    let entry = parse_entry_line(line.text).map_err(|issue| ParseError::TimeFormat {
        line: line.number,
        issue,
    })?;
    let interval = resolve(entry.start, entry.end).map_err(|source| ParseError::TimeRange {
        line: line.number,
        source,
    })?;

    Ok(TimeRecord::new(entry.start, entry.end, interval, entry.task))
}

#[cfg(test)]
mod tests {
    use super::{parse_document, EntryIssue, ErrorKind, ParseError, StructuralIssue};
    use crate::model::document::CalendarDate;
    use chrono::Duration;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(year, month, day).expect("test date should be valid")
    }

    #[test]
    fn parses_single_block() {
        let document = parse_document("2025-08-25\n9:00 - 9:20 : Task 1\n9:20 - 9:50 : Task 2")
            .expect("document should parse");

        assert_eq!(document.blocks().len(), 1);
        let block = &document.blocks()[0];
        assert_eq!(block.date(), date(2025, 8, 25));
        assert_eq!(block.entries().len(), 2);
        assert_eq!(block.entries()[0].task(), "Task 1");
        assert_eq!(block.entries()[0].elapsed(), Duration::minutes(20));
        assert_eq!(block.entries()[1].elapsed(), Duration::minutes(30));
    }

    #[test]
    fn parses_blocks_separated_by_one_blank_line() {
        let text = "2025-08-25\n9:00 - 9:20 : A\n\n2025-08-26\n8:35 - 9:00 : B\n";
        let document = parse_document(text).unwrap();
        assert_eq!(document.blocks().len(), 2);
        assert_eq!(document.blocks()[1].date(), date(2025, 8, 26));
        assert_eq!(document.record_count(), 2);
    }

    #[test]
    fn accepts_crlf_and_surrounding_whitespace() {
        let text = "\r\n\r\n  2025-08-25\r\n9:00 - 9:20 : A\r\n\r\n2025-08-26\r\n1:00 - 2:00 : B \r\n\r\n";
        let document = parse_document(text).unwrap();
        assert_eq!(document.blocks().len(), 2);
        assert_eq!(document.blocks()[1].entries()[0].task(), "B");
    }

    #[test]
    fn whitespace_only_line_separates_blocks() {
        let text = "2025-08-25\n9:00 - 9:20 : A\n   \n2025-08-26\n1:00 - 2:00 : B";
        assert_eq!(parse_document(text).unwrap().blocks().len(), 2);
    }

    #[test]
    fn rejects_empty_document() {
        let err = parse_document(" \n\t\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                line: 1,
                issue: StructuralIssue::EmptyDocument,
            }
        );
    }

    #[test]
    fn rejects_double_blank_line_between_blocks() {
        let text = "2025-08-25\n9:00 - 9:20 : A\n\n\n2025-08-26\n1:00 - 2:00 : B";
        let err = parse_document(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn rejects_date_without_entries() {
        let text = "2025-08-25\n9:00 - 9:20 : A\n\n2025-08-26";
        let err = parse_document(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::Structural {
                line: 4,
                issue: StructuralIssue::MissingEntries {
                    date: "2025-08-26".to_string(),
                },
            }
        );
    }

    #[test]
    fn rejects_entry_line_in_date_position() {
        let err = parse_document("9:00 - 9:20 : A").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DateFormat);
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn line_numbers_count_leading_blank_lines() {
        let text = "\n\n2025-08-25\n9:00 - 9:20 : A\n9:20 - 9:20 : B";
        let err = parse_document(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimeRange);
        assert_eq!(err.line(), 5);
    }

    #[test]
    fn stops_at_first_bad_entry() {
        let text = "2025-08-25\n9:00 - ?? : A\n13:00 - 1:00 : B";
        let err = parse_document(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::TimeFormat {
                line: 2,
                issue: EntryIssue::Placeholder,
            }
        );
    }

    #[test]
    fn blocks_may_share_a_date() {
        let text = "2025-08-25\n9:00 - 9:20 : A\n\n2025-08-25\n1:00 - 2:00 : A";
        let document = parse_document(text).unwrap();
        assert_eq!(document.blocks().len(), 2);
        assert_eq!(document.blocks()[0].date(), document.blocks()[1].date());
    }
}
