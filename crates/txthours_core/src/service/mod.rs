//! Core use-case services.
//!
//! # Responsibility
//! - Compose parser and aggregation into caller-facing entry points.
//! - Keep CLI/FFI layers decoupled from parsing details.

pub mod document_service;
