//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing ecosystem
//! - Level comes from config, overridable with RUST_LOG
//! - Log output drives no control flow anywhere in the server

pub mod logging;
