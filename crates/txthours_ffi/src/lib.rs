//! Flutter-facing bindings for txt-hours core.

pub mod api;
