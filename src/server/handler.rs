//! Receive handler seam.
//!
//! The poll loop delivers raw bytes; what they mean (framing, protocol,
//! persistence schema) is entirely the handler's business.

use crate::net::session::SessionId;
use crate::storage::Store;

/// Receives `(session id, bytes)` for every successful read.
///
/// Partial reads are expected: the loop's buffer is fixed-capacity, so a
/// handler that needs message boundaries must reassemble them itself.
pub trait RecvHandler: Send {
    fn on_receive(&mut self, id: SessionId, bytes: &[u8]);
}

/// Blanket impl so tests and small callers can pass a closure.
impl<F> RecvHandler for F
where
    F: FnMut(SessionId, &[u8]) + Send,
{
    fn on_receive(&mut self, id: SessionId, bytes: &[u8]) {
        self(id, bytes)
    }
}

/// Handler that records the latest payload per session in the embedded
/// key-value store.
pub struct StoreHandler {
    store: Store,
}

impl StoreHandler {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Reclaim the store, e.g. to close it after the server has stopped.
    pub fn into_store(self) -> Store {
        self.store
    }
}

impl RecvHandler for StoreHandler {
    fn on_receive(&mut self, id: SessionId, bytes: &[u8]) {
        tracing::debug!(session_id = %id, len = bytes.len(), "Received data");

        let key = format!("{}/last", id);
        if let Err(e) = self.store.put(&key, bytes) {
            tracing::warn!(session_id = %id, error = %e, "Failed to persist payload");
        }
    }
}
