//! Shutdown coordination for the relay.

use tokio::sync::broadcast;

/// Fans a single stop request out to every running task.
///
/// Each task that must stop holds its own receiver; one call to
/// [`Shutdown::trigger`] wakes all of them.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Fresh coordinator with no listeners yet.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver that resolves once a stop is requested. Must be taken before
    /// `trigger`, a late subscriber misses the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every current subscriber to stop. Harmless with none listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
