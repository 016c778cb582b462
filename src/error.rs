//! Server error taxonomy.
//!
//! # Responsibilities
//! - Classify failures by where they may propagate
//! - Startup errors (`AddressResolution`, `Bind`) surface to the caller
//! - `Transport` stays inside the poll loop; the affected session is closed
//! - `Internal` aborts one operation; repeated streaks are fatal

use thiserror::Error;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No bindable local address could be resolved for the configured port.
    #[error("address resolution failed for {host}:{port}: {source}")]
    AddressResolution {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// The resolved address could not be bound or listened on.
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },

    /// A per-session read or accept failure. Recovered locally by
    /// disconnecting the affected session; never escapes the poll loop.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Invariant violation (e.g. session id allocator exhaustion).
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl ServerError {
    /// Whether this error is fatal to the current `startup` attempt.
    ///
    /// Transport errors never are; they are contained per-session.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            ServerError::AddressResolution { .. } | ServerError::Bind { .. }
        )
    }
}
