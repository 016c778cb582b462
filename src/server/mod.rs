//! Server core: lifecycle control and the receive poll loop.
//!
//! # Data Flow
//! ```text
//! startup(port):
//!     shutdown() → resolve + bind + listen → Listening
//!
//! poll cycle (runtime.rs):
//!     drain pending accepts → register sessions
//!     → scan every session with try_read
//!     → dispatch (id, bytes) to the handler
//!     → disconnect sessions that closed or errored
//!
//! shutdown():
//!     disconnect all sessions → release endpoint → Idle
//! ```
//!
//! # Design Decisions
//! - Startup is shutdown-then-bind: restarting never leaks the previous
//!   endpoint or its sessions
//! - One cooperative loop, no thread per connection; latency is bounded by
//!   the poll interval
//! - Per-session failures disconnect that session only; the scan continues

pub mod handler;
pub mod runtime;

pub use handler::{RecvHandler, StoreHandler};
pub use runtime::{LifecycleState, Server};
