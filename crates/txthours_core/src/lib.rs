//! Core domain logic for txt-hours day logs.
//! This crate turns a plaintext day log into a date x task duration table.

pub mod aggregate;
pub mod logging;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod service;

pub use aggregate::totals::compute_totals;
pub use aggregate::{aggregate, AggregatedResult};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status, LogTarget};
pub use model::clock::{AbsoluteTime, ClockTime, ClockTimeError};
pub use model::document::{CalendarDate, DayBlock, Document, TimeRecord};
pub use model::duration::{format_hours, fractional_hours, Duration};
pub use parser::{parse_document, ErrorKind, ParseError};
pub use resolve::{resolve, ResolvedInterval, TimeRangeError};
pub use service::document_service::{check_document, process_document, DocumentStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
