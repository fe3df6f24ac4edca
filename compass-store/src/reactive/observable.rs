//! Observable fields.
//!
//! An observable is the fundamental source of reactive state: one mutable
//! value that records its readers and notifies the runtime when it changes.
//!
//! # How observables work
//!
//! 1. When an observable is read inside a tracking frame (a running computed
//!    derivation), the read registers a dependency edge for that reader.
//!
//! 2. When the value is replaced, the runtime marks every dependent computed
//!    cache stale. Nothing recomputes until the next read.
//!
//! Values are replaced wholesale; readers get clones. This matches how the
//! store layer refreshes data (a completed fetch commits a whole new list or
//! record, never an in-place patch).

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::runtime::{next_source_id, Runtime};
use super::tracker::Tracker;

/// A mutable, tracked value of type `T`.
///
/// Cloning an `Observable` produces another handle to the same state.
pub struct Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Unique source identifier for this field.
    id: u64,

    /// The current value.
    value: Arc<RwLock<T>>,
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new observable with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            id: next_source_id(),
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Get this observable's source ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get a clone of the current value.
    ///
    /// If called during a derivation run, the running reader is recorded as
    /// a dependent of this field.
    pub fn get(&self) -> T {
        if let Some(reader) = Tracker::current_reader() {
            Tracker::record_read(self.id);
            Runtime::add_dependency(self.id, reader);
        }

        self.value.read().clone()
    }

    /// Get the current value without recording a dependency.
    pub fn get_untracked(&self) -> T {
        self.value.read().clone()
    }

    /// Replace the value and invalidate all dependents.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.value.write();
            *guard = value;
        }

        trace!(id = self.id, "observable set");
        Runtime::notify_change(self.id);
    }

    /// Replace the value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let new_value = {
            let guard = self.value.read();
            f(&guard)
        };
        self.set(new_value);
    }
}

impl<T> Clone for Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Debug for Observable<T>
where
    T: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("id", &self.id)
            .field("value", &*self.value.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::reader::ReaderId;

    #[test]
    fn observable_get_and_set() {
        let field = Observable::new(0);
        assert_eq!(field.get(), 0);

        field.set(42);
        assert_eq!(field.get(), 42);
    }

    #[test]
    fn observable_update() {
        let field = Observable::new(10);
        field.update(|v| v + 5);
        assert_eq!(field.get(), 15);
    }

    #[test]
    fn observable_clone_shares_state() {
        let field1 = Observable::new(0);
        let field2 = field1.clone();

        field1.set(42);
        assert_eq!(field2.get(), 42);

        field2.set(100);
        assert_eq!(field1.get(), 100);
    }

    #[test]
    fn observable_ids_are_unique() {
        let f1 = Observable::new(0);
        let f2 = Observable::new(0);
        let f3 = Observable::new(0);

        assert_ne!(f1.id(), f2.id());
        assert_ne!(f2.id(), f3.id());
        assert_ne!(f1.id(), f3.id());
    }

    #[test]
    fn tracked_read_records_the_field() {
        let field = Observable::new(1);

        let reader = ReaderId::new();
        let _frame = Tracker::enter(reader);
        field.get();

        assert_eq!(Tracker::collected_reads(), vec![field.id()]);
    }

    #[test]
    fn untracked_read_records_nothing() {
        let field = Observable::new(1);

        let reader = ReaderId::new();
        let _frame = Tracker::enter(reader);
        field.get_untracked();

        assert!(Tracker::collected_reads().is_empty());
    }
}
