//! View lifetime tracking for asynchronous fetches
//!
//! Applying a fetch result to a torn-down view is a correctness bug, not
//! a cosmetic one. Every view owns a [`ViewScope`]; every fetch takes a
//! [`FetchTicket`] from it and checks the ticket before applying its
//! result. Teardown cancels the token and bumps the generation, so any
//! in-flight completion sees a stale ticket and discards itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

/// Lifetime scope of a single view instance
#[derive(Debug)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            token: CancellationToken::new(),
        }
    }

    /// Start a fetch against the current generation
    pub fn begin(&self) -> FetchTicket {
        FetchTicket {
            expected: self.generation.load(Ordering::Acquire),
            generation: Arc::clone(&self.generation),
            token: self.token.clone(),
        }
    }

    /// Supersede all in-flight fetches without tearing the view down
    /// (a newer reload replaces an older one).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Tear the view down; all in-flight fetches must discard.
    pub fn teardown(&self) {
        self.invalidate();
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancellation token for fetches that want to abort early instead
    /// of completing and discarding.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a fetch while holding its loading skeleton visible for a floor
/// duration, so fast responses don't flash the placeholder. Purely
/// cosmetic: the result is returned unchanged and never gated on the
/// timer alone.
pub async fn with_minimum_duration<F>(floor: std::time::Duration, fut: F) -> F::Output
where
    F: std::future::Future,
{
    let (output, _) = tokio::join!(fut, tokio::time::sleep(floor));
    output
}

/// Handle captured at fetch start and checked before applying results
#[derive(Debug, Clone)]
pub struct FetchTicket {
    expected: u64,
    generation: Arc<AtomicU64>,
    token: CancellationToken,
}

impl FetchTicket {
    /// Whether the owning view still wants this fetch's result
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled() && self.generation.load(Ordering::Acquire) == self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_live_until_invalidated() {
        let scope = ViewScope::new();
        let ticket = scope.begin();
        assert!(ticket.is_live());

        scope.invalidate();
        assert!(!ticket.is_live());

        // A fetch started after the invalidation is current again
        assert!(scope.begin().is_live());
    }

    #[test]
    fn test_teardown_is_terminal() {
        let scope = ViewScope::new();
        let ticket = scope.begin();

        scope.teardown();
        assert!(!ticket.is_live());
        assert!(scope.is_torn_down());
        assert!(!scope.begin().is_live());
    }

    #[tokio::test]
    async fn test_minimum_duration_does_not_alter_results() {
        let floor = std::time::Duration::from_millis(10);
        let value = with_minimum_duration(floor, async { 7 }).await;
        assert_eq!(value, 7);
    }
}
