//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Open store → Start server → Run poll loop
//!
//! Shutdown (shutdown.rs):
//!     StopSignal triggered → loop exits → sessions disconnected → endpoint
//!     released → store closed
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger StopSignal
//! ```
//!
//! # Design Decisions
//! - Ordered startup: store first, then the endpoint, then the loop
//! - Ordered shutdown: loop, sessions, endpoint, store
//! - A stop already triggered is observable by late subscribers

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{StopListener, StopSignal};
