//! Session-tracking TCP server library.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌─────────────────────────────────────────────┐
//!                 │                SESSION SERVER                │
//!                 │                                              │
//!   TCP connect   │  ┌──────────┐   ┌──────────┐  ┌───────────┐ │
//!   ──────────────┼─▶│   net    │──▶│   net    │─▶│  server   │ │
//!                 │  │ acceptor │   │ registry │  │ poll loop │ │
//!                 │  └──────────┘   └──────────┘  └─────┬─────┘ │
//!                 │                                     │       │
//!                 │                                     ▼       │
//!                 │                              ┌───────────┐  │
//!                 │                              │  handler  │──┼──▶ storage (kv)
//!                 │                              └───────────┘  │
//!                 │                                              │
//!                 │  ┌────────────────────────────────────────┐  │
//!                 │  │          Cross-Cutting Concerns         │  │
//!                 │  │ ┌────────┐ ┌───────────┐ ┌───────────┐ │  │
//!                 │  │ │ config │ │ lifecycle │ │ observa-  │ │  │
//!                 │  │ │        │ │ stop/sigs │ │ bility    │ │  │
//!                 │  │ └────────┘ └───────────┘ └───────────┘ │  │
//!                 │  └────────────────────────────────────────┘  │
//!                 └─────────────────────────────────────────────┘
//! ```
//!
//! One cooperative control loop owns everything: each poll cycle drains
//! pending accepts, scans every registered session for readable bytes, and
//! hands `(session id, bytes)` to the configured handler. No thread per
//! connection, no blocking I/O inside the loop.

// Core subsystems
pub mod config;
pub mod net;
pub mod server;
pub mod storage;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use error::ServerError;
pub use lifecycle::StopSignal;
pub use net::session::SessionId;
pub use server::{RecvHandler, Server};
