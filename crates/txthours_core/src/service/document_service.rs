//! Day-log processing use-cases.
//!
//! # Responsibility
//! - Provide the single parse-and-aggregate entry point for collaborators.
//! - Emit metadata-only log events for accepted and rejected documents.
//!
//! # Invariants
//! - Stateless: every call reads only its own input.
//! - A rejected document never yields partial results.
//! - Task text and raw input are never written to logs.

use crate::aggregate::{aggregate, AggregatedResult};
use crate::parser::{parse_document, ParseError};
use log::{info, warn};

/// Counts reported when a document is only validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub day_blocks: usize,
    pub records: usize,
    pub dates: usize,
}

/// Parses and aggregates one day-log submission.
///
/// # Errors
/// Returns the first `ParseError` found anywhere in the document.
pub fn process_document(raw_text: &str) -> Result<AggregatedResult, ParseError> {
    let document = parse_document(raw_text).map_err(log_rejection)?;
    let result = aggregate(&document);

    info!(
        "event=document_processed module=core status=ok day_blocks={} records={} dates={} tasks={}",
        document.blocks().len(),
        document.record_count(),
        result.dates().len(),
        result.task_names().len()
    );
    Ok(result)
}

/// Validates one day-log submission without building the table.
///
/// # Errors
/// Same as [`process_document`].
pub fn check_document(raw_text: &str) -> Result<DocumentStats, ParseError> {
    let document = parse_document(raw_text).map_err(log_rejection)?;
    let mut dates = document
        .blocks()
        .iter()
        .map(|block| block.date())
        .collect::<Vec<_>>();
    dates.sort_unstable();
    dates.dedup();

    let stats = DocumentStats {
        day_blocks: document.blocks().len(),
        records: document.record_count(),
        dates: dates.len(),
    };
    info!(
        "event=document_checked module=core status=ok day_blocks={} records={} dates={}",
        stats.day_blocks, stats.records, stats.dates
    );
    Ok(stats)
}

fn log_rejection(err: ParseError) -> ParseError {
    warn!(
        "event=document_rejected module=core status=error kind={} line={}",
        err.kind(),
        err.line()
    );
    err
}
