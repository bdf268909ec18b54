//! Single-subject observer variant.
//!
//! A [`Subject`] owns one ordered [`IndexedObserverList`] and notifies every
//! observer in it with the same context value. There is no topic dimension.
//!
//! Observers are compared by identity (`Arc::ptr_eq`), and the same observer
//! may be added more than once; each addition is notified separately.

pub mod list;
pub mod subject;

pub use list::IndexedObserverList;
pub use subject::{NotifyReport, Subject};

/// Capability every observer implements.
///
/// `update` takes `&self` because a notification runs on a shared snapshot of
/// the observer list; use interior mutability for observer state.
pub trait Observer<C>: Send + Sync {
    /// Called once per `Subject::notify`.
    fn update(&self, context: &C);

    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<C, F> Observer<C> for F
where
    F: Fn(&C) + Send + Sync,
{
    fn update(&self, context: &C) {
        self(context)
    }
}

#[cfg(test)]
mod tests;
