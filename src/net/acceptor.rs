//! Listening endpoint and non-blocking accept.
//!
//! # Responsibilities
//! - Resolve a local address for the configured host and port
//! - Bind and listen with a bounded, configurable backlog
//! - Drain connections that have already completed the accept handshake,
//!   without ever waiting for one

use std::net::SocketAddr;

use futures_util::FutureExt;
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::error::ServerError;

/// The bound, listening endpoint. At most one exists per server instance,
/// and it exists exactly while the server is in the Listening state.
pub struct Acceptor {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Acceptor {
    /// Resolve, bind and listen on `host:port`.
    ///
    /// Uses `TcpSocket` rather than `TcpListener::bind` so the backlog is
    /// explicit. `SO_REUSEADDR` is set so a restart can rebind the port
    /// without waiting out TIME_WAIT.
    pub async fn bind(host: &str, port: u16, backlog: u32) -> Result<Self, ServerError> {
        let mut addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
            ServerError::AddressResolution {
                host: host.to_string(),
                port,
                source: e,
            }
        })?;
        let addr = addrs.next().ok_or_else(|| ServerError::AddressResolution {
            host: host.to_string(),
            port,
            source: std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                "resolution returned no addresses",
            ),
        })?;

        let socket_result = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        };
        let socket = socket_result.map_err(|e| ServerError::Bind { port, source: e })?;

        socket
            .set_reuseaddr(true)
            .map_err(|e| ServerError::Bind { port, source: e })?;
        socket
            .bind(addr)
            .map_err(|e| ServerError::Bind { port, source: e })?;

        let listener = socket
            .listen(backlog)
            .map_err(|e| ServerError::Bind { port, source: e })?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Bind { port, source: e })?;

        tracing::info!(
            address = %local_addr,
            backlog = backlog,
            "Listening for connections"
        );

        Ok(Self { inner: listener, local_addr })
    }

    /// Accept every connection that is ready right now.
    ///
    /// Never blocks: the accept future is polled once per pending
    /// connection and abandoned as soon as it reports pending. An accept
    /// error ends this cycle's drain; the failed slot is retried next cycle.
    pub fn accept_pending(&self) -> Vec<(TcpStream, SocketAddr)> {
        let mut accepted = Vec::new();
        while let Some(result) = self.inner.accept().now_or_never() {
            match result {
                Ok((stream, peer)) => accepted.push((stream, peer)),
                Err(e) => {
                    tracing::warn!(error = %e, "Accept failed");
                    break;
                }
            }
        }
        accepted
    }

    /// Get the local address this endpoint is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}
