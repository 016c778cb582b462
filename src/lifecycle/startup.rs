//! Startup orchestration.
//!
//! # Responsibilities
//! - Bring subsystems up in dependency order and down in reverse
//! - Guarantee the store is open before the first accept and closed only
//!   after the last disconnect
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal to the process
//! - Shutdown always runs on the stop path, even after loop failures

use std::path::Path;

use crate::config::ServerConfig;
use crate::lifecycle::{signals, StopSignal};
use crate::server::{Server, StoreHandler};
use crate::storage::Store;

/// Construct → start → serve until stopped → stop → release.
///
/// This sequence is the program's only externally observable contract: the
/// store opens before the endpoint exists, the loop runs until an OS signal,
/// and the store closes only once every session is gone.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open(Path::new(&config.storage.path))?;

    let port = config.listener.port;
    let mut server = Server::new(config, StoreHandler::new(store));
    server.startup(port).await?;

    let stop = StopSignal::new();
    signals::spawn_listener(&stop);

    server.run(stop.listener()).await;

    // run() has already shut the server down; reclaim and close the store.
    let store = server.into_handler().into_store();
    store.close()?;

    Ok(())
}
