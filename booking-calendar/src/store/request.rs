//! Request bookkeeping shared by the stores.
//!
//! Two concerns: which response is allowed to write (only the most recently
//! issued request of an action), and whether the store is loading (any
//! request of the store still in flight).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

/// Identifies one issued request of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

/// Monotonically increasing request tickets for one action.
#[derive(Debug, Default)]
pub(crate) struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    /// Issue a ticket newer than every ticket issued before it.
    pub(crate) fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`.
    pub(crate) fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Store state with the standard loading/error flags.
pub(crate) trait RequestState {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

/// Counts in-flight requests of one store.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: Mutex<usize>,
}

impl InFlight {
    /// Mark a request as started: loading on, error cleared.
    ///
    /// The returned guard ends the request when dropped, whether the action
    /// completed, failed, or was cancelled mid-await.
    pub(crate) fn begin<'a, S: RequestState>(
        &'a self,
        state: &'a watch::Sender<S>,
    ) -> LoadingGuard<'a, S> {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
        state.send_modify(|s| {
            s.set_loading(true);
            s.set_error(None);
        });

        LoadingGuard {
            in_flight: self,
            state,
        }
    }

    #[cfg(test)]
    pub(crate) fn count(&self) -> usize {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ends one request on drop; the last one out clears `loading`.
pub(crate) struct LoadingGuard<'a, S: RequestState> {
    in_flight: &'a InFlight,
    state: &'a watch::Sender<S>,
}

impl<S: RequestState> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        // Counter and flag change under one lock so a concurrent `begin`
        // cannot interleave between them.
        let mut count = self
            .in_flight
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.state.send_modify(|s| s.set_loading(false));
        }
    }
}
