//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! Process start:
//!     store.rs opens the database file (before any connection is accepted)
//!
//! While serving:
//!     handlers put/get opaque values under string keys
//!
//! Process end:
//!     store closed (after every session is disconnected)
//! ```
//!
//! # Design Decisions
//! - Embedded store, one file, no server round-trips
//! - Key-value only; what keys mean is the caller's concern

pub mod store;

pub use store::{Store, StoreError};
