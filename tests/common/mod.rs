//! Shared utilities for integration tests.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;

use sessiond::config::ServerConfig;
use sessiond::server::{RecvHandler, Server};
use sessiond::SessionId;

/// Config bound to loopback with a fast poll interval.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.poll.interval_ms = 5;
    config
}

/// Handler that forwards every dispatch to a channel for assertions.
#[allow(dead_code)]
pub fn recording_handler() -> (
    impl RecvHandler,
    mpsc::UnboundedReceiver<(u64, Vec<u8>)>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handler = move |id: SessionId, bytes: &[u8]| {
        let _ = tx.send((id.as_u64(), bytes.to_vec()));
    };
    (handler, rx)
}

/// Connect a client to the local server, retrying briefly while the
/// endpoint comes up.
#[allow(dead_code)]
pub async fn connect(port: u16) -> TcpStream {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("could not connect to 127.0.0.1:{}", port);
}

/// Drive poll cycles until `pred` holds, giving up after a bounded number
/// of attempts.
#[allow(dead_code)]
pub async fn poll_until<H, P>(server: &mut Server<H>, mut pred: P) -> bool
where
    H: RecvHandler,
    P: FnMut(&Server<H>) -> bool,
{
    for _ in 0..200 {
        server.poll_and_dispatch().expect("poll failed");
        if pred(server) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}
