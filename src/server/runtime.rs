//! Lifecycle controller and receive multiplexer.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::lifecycle::StopListener;
use crate::net::acceptor::Acceptor;
use crate::net::registry::SessionRegistry;
use crate::net::session::{ReadEvent, Session, SessionId, SessionState};
use crate::server::handler::RecvHandler;

/// Consecutive internal errors tolerated before the loop gives up and
/// initiates shutdown.
const INTERNAL_ERROR_FATAL_STREAK: u32 = 3;

/// Lifecycle state of a server instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No endpoint exists; the server accepts nothing.
    Idle,
    /// The endpoint is bound and the poll loop may run.
    Listening,
}

/// The session server.
///
/// Owns the listening endpoint (exactly while Listening), the session
/// registry, and the fixed-capacity read buffer. All mutation happens on the
/// caller's task; there is no interior locking because there is exactly one
/// writer.
pub struct Server<H: RecvHandler> {
    config: ServerConfig,
    acceptor: Option<Acceptor>,
    registry: SessionRegistry,
    handler: H,
    read_buf: Vec<u8>,
    internal_streak: u32,
}

impl<H: RecvHandler> Server<H> {
    pub fn new(config: ServerConfig, handler: H) -> Self {
        // A zero-capacity read returns Ok(0), indistinguishable from a peer
        // close; clamp to one byte for callers that bypass config validation.
        let read_buf = vec![0u8; config.poll.read_buffer_bytes.max(1)];
        Self {
            config,
            acceptor: None,
            registry: SessionRegistry::new(),
            handler,
            read_buf,
            internal_streak: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        if self.acceptor.is_some() {
            LifecycleState::Listening
        } else {
            LifecycleState::Idle
        }
    }

    pub fn is_listening(&self) -> bool {
        self.acceptor.is_some()
    }

    /// Address of the listening endpoint, while one exists.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.acceptor.as_ref().map(Acceptor::local_addr)
    }

    /// Bind and listen on `port`.
    ///
    /// If the server is already listening this performs a full `shutdown`
    /// first, so a restart never accumulates stale sessions or a second
    /// endpoint. On failure the endpoint is left unset and the server is
    /// fully Idle; there is no observable half-initialized state.
    pub async fn startup(&mut self, port: u16) -> Result<(), ServerError> {
        self.shutdown();

        let listener = &self.config.listener;
        match Acceptor::bind(&listener.host, port, listener.backlog).await {
            Ok(acceptor) => {
                self.acceptor = Some(acceptor);
                Ok(())
            }
            Err(e) => {
                tracing::error!(port = port, error = %e, "Startup failed");
                Err(e)
            }
        }
    }

    /// Disconnect every session and release the endpoint.
    ///
    /// No-op when Idle, safe to call repeatedly and from error-recovery
    /// paths. Bounded: each disconnect is a local close, never a network
    /// round-trip wait.
    pub fn shutdown(&mut self) {
        if self.acceptor.is_none() {
            return;
        }

        self.registry.disconnect_all();
        self.acceptor = None;
        tracing::info!("Listening endpoint released");
    }

    /// One poll cycle: fold in newly accepted connections, then scan every
    /// connected session for readable bytes and dispatch them.
    ///
    /// Per-session failures disconnect that session and the scan continues.
    /// The only error returned is a fatal internal-error streak, which the
    /// run loop answers with shutdown.
    pub fn poll_and_dispatch(&mut self) -> Result<(), ServerError> {
        let Some(acceptor) = &self.acceptor else {
            return Ok(());
        };

        for (stream, peer) in acceptor.accept_pending() {
            match self.registry.register(stream, peer) {
                Ok(_) => self.internal_streak = 0,
                Err(e) => {
                    // The accepted stream is dropped (closed), not leaked
                    // half-registered; the server keeps serving.
                    tracing::error!(peer_addr = %peer, error = %e, "Registration failed, closing connection");
                    self.internal_streak += 1;
                    if self.internal_streak >= INTERNAL_ERROR_FATAL_STREAK {
                        return Err(ServerError::Internal(format!(
                            "{} consecutive registration failures",
                            self.internal_streak
                        )));
                    }
                }
            }
        }

        for id in self.registry.ids() {
            let event = match self.registry.get_mut(id) {
                Some(session) if session.state() == SessionState::Connected => {
                    session.try_read(&mut self.read_buf)
                }
                _ => continue,
            };

            match event {
                Ok(ReadEvent::Data(n)) => {
                    self.handler.on_receive(id, &self.read_buf[..n]);
                }
                Ok(ReadEvent::Idle) => {}
                Ok(ReadEvent::PeerClosed) => {
                    tracing::debug!(session_id = %id, "Peer closed connection");
                    self.registry.disconnect(id);
                }
                Err(e) => {
                    tracing::warn!(session_id = %id, error = %e, "Receive failed, disconnecting session");
                    self.registry.disconnect(id);
                }
            }
        }

        Ok(())
    }

    /// Drive poll cycles until the stop signal fires, the endpoint is gone,
    /// or an internal-error streak turns fatal. Always ends with `shutdown`.
    pub async fn run(&mut self, mut stop: StopListener) {
        let mut tick =
            tokio::time::interval(Duration::from_millis(self.config.poll.interval_ms));
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.is_listening() {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = self.poll_and_dispatch() {
                        tracing::error!(error = %e, "Fatal poll failure, shutting down");
                        break;
                    }
                }
                _ = stop.stopped() => {
                    tracing::info!("Stop signal received");
                    break;
                }
            }
        }

        self.shutdown();
    }

    /// Look up a live session. `None` is the normal answer for a session
    /// that has already disconnected.
    pub fn lookup(&self, id: SessionId) -> Option<&Session> {
        self.registry.lookup(id)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.registry.ids()
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Disconnect one session; unknown ids are a silent no-op.
    pub fn disconnect(&mut self, id: SessionId) {
        self.registry.disconnect(id);
    }

    /// Disconnect every session without releasing the endpoint.
    pub fn disconnect_all(&mut self) {
        self.registry.disconnect_all();
    }

    /// Consume the server and reclaim its handler, e.g. to close resources
    /// the handler owns once serving has ended.
    pub fn into_handler(mut self) -> H {
        self.shutdown();
        self.handler
    }
}
