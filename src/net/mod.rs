//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → acceptor.rs (non-blocking accept, bounded backlog)
//!     → registry.rs (id allocation, lifecycle bookkeeping)
//!     → session.rs (exclusive stream ownership, state machine)
//!     → Hand off to the server poll loop
//!
//! Session States:
//!     Connected → Closing → Closed
//! ```
//!
//! # Design Decisions
//! - Bounded accept backlog prevents resource exhaustion
//! - Exactly one Session owns each accepted stream
//! - A Closed session is removed from the registry in the same step

pub mod acceptor;
pub mod registry;
pub mod session;

pub use acceptor::Acceptor;
pub use registry::SessionRegistry;
pub use session::{ReadEvent, Session, SessionId, SessionState};
