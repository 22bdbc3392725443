//! Refresh session around one configured aggregator.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use cumul_shared::FetchToken;
use tracing::{debug, info, warn};

use crate::grouping::{Aggregator, GroupTree};

/// Outcome of completing or failing a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The batch was aggregated and the new tree installed.
    Installed,
    /// The failure cleared the current tree.
    Cleared,
    /// The token was stale; nothing changed.
    Stale,
}

impl RefreshOutcome {
    /// Returns true if a new tree was installed.
    #[must_use]
    pub const fn is_installed(self) -> bool {
        matches!(self, Self::Installed)
    }

    /// Returns true if the current tree was cleared.
    #[must_use]
    pub const fn is_cleared(self) -> bool {
        matches!(self, Self::Cleared)
    }

    /// Returns true if the result was discarded as stale.
    #[must_use]
    pub const fn is_stale(self) -> bool {
        matches!(self, Self::Stale)
    }
}

struct SessionState<R> {
    current: Option<Arc<GroupTree<R>>>,
    pending: Option<FetchToken>,
}

/// Owns the tree a view renders and the refresh protocol around it.
///
/// One session wraps one configured aggregator. A refresh starts by taking
/// a token, the caller fetches however it likes, then hands the rows back
/// with that token. Only the latest token may install or clear; anything
/// older is discarded, so a slow response never overwrites newer data.
///
/// Aggregation runs synchronously on the calling thread and the finished
/// tree is swapped in whole: readers see either the previous tree or the
/// new one, never a half-built state.
pub struct ReportSession<R> {
    aggregator: Aggregator<R>,
    state: RwLock<SessionState<R>>,
}

impl<R> ReportSession<R> {
    /// Creates a session around a configured aggregator.
    #[must_use]
    pub fn new(aggregator: Aggregator<R>) -> Self {
        Self {
            aggregator,
            state: RwLock::new(SessionState {
                current: None,
                pending: None,
            }),
        }
    }

    /// Starts a refresh and returns its token.
    ///
    /// Any earlier in-flight fetch becomes stale immediately.
    pub fn begin_refresh(&self) -> FetchToken {
        let token = FetchToken::new();
        let mut state = self.write();
        if let Some(stale) = state.pending.replace(token) {
            debug!(%stale, %token, "superseding in-flight refresh");
        } else {
            debug!(%token, "refresh begun");
        }
        token
    }

    /// Completes a refresh with the fetched rows.
    ///
    /// With the latest token the rows are aggregated and the new tree
    /// installed. With a stale token the rows are dropped untouched.
    pub fn complete_refresh(&self, token: FetchToken, records: Vec<R>) -> RefreshOutcome {
        if self.read().pending != Some(token) {
            warn!(%token, "discarding stale refresh result");
            return RefreshOutcome::Stale;
        }

        let tree = Arc::new(self.aggregator.aggregate(records));

        let mut state = self.write();
        // A newer refresh may have started while aggregating.
        if state.pending != Some(token) {
            warn!(%token, "discarding stale refresh result");
            return RefreshOutcome::Stale;
        }
        info!(%token, records = tree.count, "installing refreshed tree");
        state.current = Some(tree);
        state.pending = None;
        RefreshOutcome::Installed
    }

    /// Records a failed fetch.
    ///
    /// With the latest token the current tree is cleared: the aggregator is
    /// never invoked and the view stops showing data the fetch could not
    /// confirm. Stale failures are ignored.
    pub fn fail_refresh(&self, token: FetchToken) -> RefreshOutcome {
        let mut state = self.write();
        if state.pending != Some(token) {
            debug!(%token, "ignoring stale refresh failure");
            return RefreshOutcome::Stale;
        }
        warn!(%token, "refresh failed, clearing current tree");
        state.current = None;
        state.pending = None;
        RefreshOutcome::Cleared
    }

    /// The tree the view currently renders, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<GroupTree<R>>> {
        self.read().current.clone()
    }

    /// Drops the current tree and any in-flight token.
    pub fn clear(&self) {
        let mut state = self.write();
        state.current = None;
        state.pending = None;
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState<R>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState<R>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
