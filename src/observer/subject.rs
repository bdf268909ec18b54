use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::observer::Observer;
use crate::observer::list::IndexedObserverList;
use crate::utils::error::SubscriberFailure;

/// Outcome of one `Subject::notify` call.
#[derive(Debug, Clone, Default)]
pub struct NotifyReport {
    /// Number of observers whose `update` was invoked.
    pub notified: usize,
    pub failures: Vec<SubscriberFailure>,
}

/// Owns one ordered observer list and fans a context value out to it.
///
/// Like the broker, `notify` works on a snapshot taken under the lock and
/// calls observers with the lock released.
pub struct Subject<C> {
    observers: Mutex<IndexedObserverList<dyn Observer<C>>>,
}

impl<C> Subject<C> {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(IndexedObserverList::new()),
        }
    }

    /// Appends `observer`; returns the new observer count.
    pub fn add_observer(&self, observer: Arc<dyn Observer<C>>) -> usize {
        let name = observer.name().to_string();
        let count = self.observers.lock().add(observer);
        debug!(observer = %name, count, "observer added");
        count
    }

    /// Removes the first occurrence of `observer`.
    ///
    /// Returns `false` without touching the list when `observer` was never added.
    pub fn remove_observer(&self, observer: &Arc<dyn Observer<C>>) -> bool {
        let mut observers = self.observers.lock();
        let Some(index) = observers.index_of(observer, 0) else {
            debug!(observer = %observer.name(), "remove_observer: not a member");
            return false;
        };
        let removed = observers.remove_at(index).is_ok();
        debug!(observer = %observer.name(), index, "observer removed");
        removed
    }

    pub fn count(&self) -> usize {
        self.observers.lock().count()
    }

    /// Calls `update(context)` on every observer, in list order.
    pub fn notify(&self, context: &C) -> NotifyReport {
        let snapshot = self.observers.lock().snapshot();
        let mut failures = Vec::new();

        for observer in &snapshot {
            trace!(observer = %observer.name(), "notifying");
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| observer.update(context))) {
                let failure = SubscriberFailure::from_panic(observer.name(), panic);
                warn!(observer = %observer.name(), error = %failure.message, "observer panicked");
                failures.push(failure);
            }
        }

        NotifyReport {
            notified: snapshot.len(),
            failures,
        }
    }
}

impl<C> Default for Subject<C> {
    fn default() -> Self {
        Self::new()
    }
}
