//! Cooperative cancellation for cache reads.

use std::future;

use tokio::sync::watch;

/// Owner side: fires the signal.
#[derive(Debug)]
pub struct Canceller {
    sender: watch::Sender<bool>,
}

/// Observer side: handed to [`ReferenceCache::get`](super::ReferenceCache::get).
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    receiver: watch::Receiver<bool>,
}

impl Canceller {
    /// A canceller that has not fired.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);

        Self { sender }
    }

    /// A signal observing this canceller.
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Default for Canceller {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    /// Whether the signal has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the signal fires. Never resolves if the canceller is dropped unfired.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();

        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            future::pending::<()>().await;
        }
    }
}
