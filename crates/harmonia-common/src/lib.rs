//! Common utilities for the Harmonia layout engine.
//!
//! This crate provides shared infrastructure used by all layout components:
//! - **Warning System** - deduplicated diagnostics routed through `tracing`

pub mod warning;
