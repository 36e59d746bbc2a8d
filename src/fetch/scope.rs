//! View scopes
//!
//! A [`ViewScope`] lives exactly as long as the view that owns it. Work run
//! through the scope stops at teardown, and its result is discarded.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Cancellation scope tied to one view
#[derive(Debug)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    /// Scope that is torn down when `parent` is cancelled or when dropped
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    /// Standalone scope
    pub fn detached() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Run `work` unless the scope is torn down first.
    ///
    /// Returns `None` when teardown wins; the caller must then leave its
    /// state alone.
    pub async fn run<F: Future>(&self, work: F) -> Option<F::Output> {
        if self.token.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = work => Some(output),
        }
    }

    /// Handle that can tear the scope down from elsewhere
    pub fn teardown_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_while_alive() {
        let scope = ViewScope::detached();
        assert_eq!(scope.run(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_teardown_interrupts_pending_work() {
        let scope = ViewScope::detached();
        let handle = scope.teardown_handle();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        let result = scope.run(std::future::pending::<u32>()).await;
        assert_eq!(result, None);
        assert!(scope.is_torn_down());
    }

    #[tokio::test]
    async fn test_torn_down_scope_never_runs_work() {
        let scope = ViewScope::detached();
        scope.teardown();
        assert_eq!(scope.run(async { 1 }).await, None);
    }

    #[test]
    fn test_parent_cancels_children_and_drop_cancels_self() {
        let root = CancellationToken::new();
        let scope = ViewScope::child_of(&root);
        let handle = scope.teardown_handle();

        drop(scope);
        assert!(handle.is_cancelled());
        assert!(!root.is_cancelled());

        let other = ViewScope::child_of(&root);
        root.cancel();
        assert!(other.is_torn_down());
    }
}
