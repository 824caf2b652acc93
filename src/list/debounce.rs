//! Keystroke debouncing for search inputs.
//!
//! Every `push` cancels the pending commit and schedules a new one after the
//! quiet period. Only a value that survives the full quiet period reaches the
//! [`CommittedSearch`] receiver, trimmed. Dropping the [`Debouncer`] aborts
//! whatever is still pending.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

pub struct Debouncer {
    quiet: Duration,
    tx: mpsc::UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

/// Receiving side of a [`Debouncer`].
pub struct CommittedSearch {
    rx: mpsc::UnboundedReceiver<String>,
}

impl Debouncer {
    pub fn channel(quiet: Duration) -> (Self, CommittedSearch) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                quiet,
                tx,
                pending: None,
            },
            CommittedSearch { rx },
        )
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Schedule `raw` for commit, replacing any pending value.
    ///
    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, raw: &str) {
        self.cancel();

        let tx = self.tx.clone();
        let value = raw.trim().to_string();
        let quiet = self.quiet;
        trace!(value = %value, "debounce scheduled");

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Receiver gone means the screen was closed.
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending commit, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl CommittedSearch {
    /// Wait for the next committed value. `None` once the debouncer is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Non-blocking poll for a committed value.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
