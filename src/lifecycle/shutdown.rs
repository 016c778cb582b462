//! Stop-signal plumbing for the serve loop.

use tokio::sync::watch;

/// One-way latch that tells the serve loop to stop.
///
/// Built on a watch channel so the "stopped" state is a value, not an event:
/// a listener subscribing after the trigger still observes it.
#[derive(Clone)]
pub struct StopSignal {
    tx: watch::Sender<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Latch the stop state. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether the stop has been triggered.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Create a listener for the serve loop (or any task) to wait on.
    pub fn listener(&self) -> StopListener {
        StopListener {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a [`StopSignal`].
pub struct StopListener {
    rx: watch::Receiver<bool>,
}

impl StopListener {
    /// Resolve once the stop has been triggered. Cancel-safe.
    pub async fn stopped(&mut self) {
        // wait_for returns immediately if the latch is already set.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_listener() {
        let signal = StopSignal::new();
        let mut listener = signal.listener();
        assert!(!signal.is_triggered());

        signal.trigger();
        listener.stopped().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn late_subscriber_observes_stop() {
        let signal = StopSignal::new();
        signal.trigger();

        let mut listener = signal.listener();
        listener.stopped().await;
    }
}
