//! Per-call deadline and cancellation.
//!
//! ```rust,ignore
//! let (canceller, signal) = CancelSignal::pair();
//! let options = CallOptions::new()
//!     .with_deadline(Duration::from_secs(5))
//!     .with_cancel(signal);
//!
//! // elsewhere
//! canceller.cancel();
//! ```

use std::time::Duration;
use tokio::sync::watch;

/// Options applied to a single API call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Overrides the client-wide request timeout for this call.
    pub deadline: Option<Duration>,
    /// Aborts the call when triggered.
    pub cancel: Option<CancelSignal>,
}

impl CallOptions {
    /// Options with no deadline override and no cancellation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline for this call.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a cancellation signal.
    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }
}

/// Triggers every [`CancelSignal`] created from the same pair.
#[derive(Debug, Clone)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    /// Cancel all calls observing this signal, including future ones.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Receiving half of a cancellation pair. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Create a linked canceller/signal pair.
    pub fn pair() -> (Canceller, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Canceller { tx }, CancelSignal { rx })
    }

    /// Returns true once the paired canceller has fired.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve when cancellation is requested.
    ///
    /// Never resolves if the canceller is dropped without firing.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_wakes_waiters() {
        let (canceller, signal) = CancelSignal::pair();
        assert!(!signal.is_cancelled());

        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.cancelled().await })
        };

        canceller.cancel();
        waiter.await.unwrap();
        assert!(signal.is_cancelled());
    }

    #[tokio::test]
    async fn test_dropped_canceller_never_fires() {
        let (canceller, signal) = CancelSignal::pair();
        drop(canceller);

        let result =
            tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
        assert!(result.is_err());
        assert!(!signal.is_cancelled());
    }

    #[test]
    fn test_options_builder() {
        let (_canceller, signal) = CancelSignal::pair();
        let options = CallOptions::new()
            .with_deadline(Duration::from_secs(5))
            .with_cancel(signal);

        assert_eq!(options.deadline, Some(Duration::from_secs(5)));
        assert!(options.cancel.is_some());
    }
}
