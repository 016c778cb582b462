//! Session state machine and stream ownership.
//!
//! # Responsibilities
//! - Track session state (Connected → Closing → Closed)
//! - Own the accepted TCP stream exclusively
//! - Expose non-blocking reads to the poll loop

use std::net::SocketAddr;
use tokio::net::TcpStream;

use crate::error::ServerError;

/// Unique identifier for a session.
///
/// Ids are allocated by the registry, monotonically per server instance, and
/// never reused within a server lifetime. Keeping the allocator on the
/// registry rather than in a process-global lets independent server
/// instances coexist (useful in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Session state for lifecycle tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session is live and scanned for incoming data.
    Connected,
    /// Disconnect in progress; no further dispatch for this session.
    Closing,
    /// Stream closed. A session in this state is already out of the registry.
    Closed,
}

/// Outcome of one non-blocking read attempt on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEvent {
    /// `n` bytes were read into the buffer.
    Data(usize),
    /// No data available this cycle.
    Idle,
    /// The peer closed the connection gracefully (zero-byte read).
    PeerClosed,
}

/// One accepted client connection plus its identity and state.
///
/// The session owns its stream exclusively; dropping the session closes the
/// connection. A session must never outlive its stream, so the stream is not
/// exposed by reference.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    stream: TcpStream,
    peer: SocketAddr,
    state: SessionState,
}

impl Session {
    pub(crate) fn new(id: SessionId, stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            id,
            stream,
            peer,
            state: SessionState::Connected,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Attempt a non-blocking read into `buf`.
    ///
    /// Maps `WouldBlock` to `Idle` and a zero-byte read to `PeerClosed`.
    /// Any other error is a transport failure for this session only.
    pub fn try_read(&mut self, buf: &mut [u8]) -> Result<ReadEvent, ServerError> {
        match self.stream.try_read(buf) {
            Ok(0) => Ok(ReadEvent::PeerClosed),
            Ok(n) => Ok(ReadEvent::Data(n)),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(ReadEvent::Idle),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(ReadEvent::Idle),
            Err(e) => Err(ServerError::Transport(e)),
        }
    }

    /// Begin disconnecting. Idempotent; the stream closes when the session
    /// is dropped.
    pub(crate) fn begin_close(&mut self) {
        if self.state == SessionState::Connected {
            self.state = SessionState::Closing;
            tracing::debug!(session_id = %self.id, peer_addr = %self.peer, "Session closing");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.state = SessionState::Closed;
        tracing::trace!(session_id = %self.id, "Session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_display() {
        let id = SessionId::from_raw(7);
        assert_eq!(id.to_string(), "session-7");
        assert_eq!(id.as_u64(), 7);
    }
}
