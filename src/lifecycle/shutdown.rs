//! Graceful stop for the listener.
//!
//! The signal listener and test harnesses hold a `Shutdown`; the HTTP server
//! holds a receiver and stops accepting once it fires, letting in-flight
//! forwards finish.

use tokio::sync::broadcast;

/// Fan-out stop signal shared by everything that must stop with the proxy.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver for `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop the proxy. A no-op when nothing is listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Servers still waiting on the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
