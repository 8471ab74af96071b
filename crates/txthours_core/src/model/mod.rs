//! Domain model for parsed day logs.
//!
//! # Responsibility
//! - Define the value types produced by the parser and consumed by aggregation.
//! - Keep every entity immutable after construction.
//!
//! # Invariants
//! - A `Document` only exists as the output of a fully successful parse.
//! - Every `TimeRecord` spans a strictly positive interval.

pub mod clock;
pub mod document;
pub mod duration;
