//! Session registry and disconnect semantics.
//!
//! # Responsibilities
//! - Allocate monotonic session ids (never reused within a server lifetime)
//! - Map id → session for every open connection
//! - Disconnect one session or all of them, idempotently
//!
//! # Design Decisions
//! - Mutated only from the server's control loop (single writer), so the map
//!   needs no locking and disconnect_all is trivially atomic w.r.t. accepts
//! - Removal happens in the same step as the Closed transition; the registry
//!   never holds a closed session

use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpStream;

use crate::error::ServerError;
use crate::net::session::{Session, SessionId};

/// Mapping from session id to live session, plus the id allocator.
///
/// The allocator survives `disconnect_all` and server restarts, so an id
/// observed by a caller is never reissued to a different connection.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Wrap an accepted stream into a session under a freshly allocated id.
    ///
    /// Fails only on allocator exhaustion, which is practically unreachable
    /// and reported as an internal error.
    pub fn register(
        &mut self,
        stream: TcpStream,
        peer: SocketAddr,
    ) -> Result<SessionId, ServerError> {
        if self.next_id == u64::MAX {
            return Err(ServerError::Internal(
                "session id allocator exhausted".to_string(),
            ));
        }
        let id = SessionId::from_raw(self.next_id);
        self.next_id += 1;

        self.sessions.insert(id, Session::new(id, stream, peer));
        tracing::debug!(session_id = %id, peer_addr = %peer, "Session registered");
        Ok(id)
    }

    /// Look up a live session. `None` for unknown or already-removed ids is
    /// a normal outcome; the peer may have disconnected concurrently.
    pub fn lookup(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Ids of every registered session.
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Close one session and remove it. Unknown ids are a silent no-op.
    ///
    /// No delivery guarantee is made for data queued at disconnect time;
    /// dropping the session closes the stream.
    pub fn disconnect(&mut self, id: SessionId) {
        if let Some(mut session) = self.sessions.remove(&id) {
            session.begin_close();
            // Dropping the session closes the stream and marks it Closed.
        }
    }

    /// Disconnect every registered session. Order across sessions is
    /// unspecified; afterwards the registry is empty.
    pub fn disconnect_all(&mut self) {
        let count = self.sessions.len();
        for (_, mut session) in self.sessions.drain() {
            session.begin_close();
        }
        if count > 0 {
            tracing::info!(session_count = count, "All sessions disconnected");
        }
    }
}
