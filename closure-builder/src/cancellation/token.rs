//! Cancellation token for cooperative cancellation.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tracing::debug;

/// A token for cooperative cancellation.
///
/// Cancellation is idempotent - only the first cancellation reason is kept.
/// The pipeline checks the token between stages and races each running stage
/// against [`CancellationToken::cancelled`].
#[derive(Default)]
pub struct CancellationToken {
    /// Whether cancellation has been requested.
    cancelled: AtomicBool,
    /// The reason for cancellation (first one wins).
    reason: RwLock<Option<String>>,
    /// Wakes tasks waiting in `cancelled()`.
    notify: Notify,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation with a reason.
    ///
    /// This is idempotent - only the first reason is kept.
    pub fn cancel(&self, reason: impl Into<String>) {
        let mut slot = self.reason.write();
        if self.cancelled.load(Ordering::SeqCst) {
            return;
        }
        let reason = reason.into();
        debug!(reason = %reason, "Cancellation requested");
        *slot = Some(reason);
        self.cancelled.store(true, Ordering::SeqCst);
        drop(slot);
        self.notify.notify_waiters();
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns the cancellation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.reason.read().clone()
    }

    /// Waits until cancellation is requested.
    ///
    /// Returns immediately if the token is already cancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent cancel is not missed.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_token_default_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.reason().is_none());
    }

    #[test]
    fn test_token_cancel() {
        let token = CancellationToken::new();
        token.cancel("User requested");

        assert!(token.is_cancelled());
        assert_eq!(token.reason(), Some("User requested".to_string()));
    }

    #[test]
    fn test_token_cancel_idempotent() {
        let token = CancellationToken::new();
        token.cancel("First reason");
        token.cancel("Second reason");

        // First reason wins
        assert_eq!(token.reason(), Some("First reason".to_string()));
    }

    #[tokio::test]
    async fn test_cancelled_returns_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel("early");
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiter() {
        let token = Arc::new(CancellationToken::new());
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel("late");

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_pending_without_cancel() {
        let token = CancellationToken::new();
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }
}
