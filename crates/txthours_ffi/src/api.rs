//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the parse-and-aggregate entry point to Dart via FRB.
//! - Return display-ready envelopes so the UI does no duration math.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Rejected documents return `ok = false` and no table data.
//! - Absent cells are empty strings; totals are always filled.

use log::debug;
use txthours_core::{
    core_version as core_version_inner, format_hours, init_logging as init_logging_inner,
    ping as ping_inner, process_document, AggregatedResult, Duration, LogTarget, ParseError,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    if log_dir.trim().is_empty() {
        return "log_dir cannot be empty".to_string();
    }
    let result = LogTarget::from_dir(Some(log_dir.as_str()))
        .and_then(|target| init_logging_inner(level.as_str(), target));
    match result {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One table row: a task and its per-date hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub task: String,
    /// Two-decimal hours aligned with `SummaryResponse::dates`; empty when absent.
    pub cells: Vec<String>,
}

/// Response envelope for one submitted day log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResponse {
    /// Whether the document was accepted.
    pub ok: bool,
    /// Human-readable message; the parse error when `ok` is false.
    pub message: String,
    /// 1-based line of the first problem, when rejected.
    pub error_line: Option<u32>,
    /// Column headers (`YYYY-MM-DD`), ascending.
    pub dates: Vec<String>,
    /// Rows sorted by task name.
    pub rows: Vec<SummaryRow>,
    /// Two-decimal totals aligned with `dates`.
    pub totals: Vec<String>,
}

impl SummaryResponse {
    fn success(result: &AggregatedResult) -> Self {
        let dates = result.dates();
        let rows = result
            .task_names()
            .iter()
            .map(|task| SummaryRow {
                task: task.clone(),
                cells: dates
                    .iter()
                    .map(|date| result.cell(task, *date).map(format_hours).unwrap_or_default())
                    .collect(),
            })
            .collect();
        let totals = dates
            .iter()
            .map(|date| format_hours(result.total(*date).unwrap_or_else(Duration::zero)))
            .collect();

        Self {
            ok: true,
            message: format!(
                "Summarized {} task(s) over {} day(s).",
                result.task_names().len(),
                dates.len()
            ),
            error_line: None,
            dates: dates.iter().map(|date| date.to_string()).collect(),
            rows,
            totals,
        }
    }

    fn failure(err: &ParseError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            error_line: u32::try_from(err.line()).ok(),
            dates: Vec::new(),
            rows: Vec::new(),
            totals: Vec::new(),
        }
    }
}

/// Parses and aggregates one submitted day log.
///
/// # FFI contract
/// - Sync call, pure CPU work over the given text.
/// - Never panics.
/// - Whole-document semantics: any error yields an empty table.
#[flutter_rust_bridge::frb(sync)]
pub fn summarize_document(text: String) -> SummaryResponse {
    let response = match process_document(text.as_str()) {
        Ok(result) => SummaryResponse::success(&result),
        Err(err) => SummaryResponse::failure(&err),
    };
    debug!(
        "event=ffi_summarize module=ffi status={} rows={} columns={}",
        if response.ok { "ok" } else { "error" },
        response.rows.len(),
        response.dates.len()
    );
    response
}
