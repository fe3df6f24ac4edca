//! Computed caches.
//!
//! A computed cache is a memoized derived value. It runs its derivation
//! lazily, remembers the result, and re-runs only after one of the sources it
//! actually read has changed.
//!
//! # How computed caches work
//!
//! 1. On first access the derivation runs inside a tracking frame, so every
//!    observable or nested computed it reads becomes a dependency.
//!
//! 2. Later accesses return the cached value without running the derivation,
//!    as long as no dependency changed.
//!
//! 3. When a dependency changes, the runtime marks the cache stale. The next
//!    access recomputes and re-establishes the dependency set from scratch,
//!    so a branch that stopped reading a source drops it.
//!
//! # Failure behavior
//!
//! A panicking derivation propagates to the caller and leaves the cache
//! stale with its previous contents untouched; the next access simply retries.
//! A cyclic derivation (a cache read during its own evaluation) is a
//! programming error and fails loudly with [`CycleError`] instead of hanging.

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::trace;

use super::reader::ReaderId;
use super::runtime::{next_source_id, DerivedNode, Runtime};
use super::tracker::Tracker;

/// Raised (as a panic payload message) when a computed cache is read during
/// its own evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cyclic computed dependency: computation {0:?} was read during its own evaluation")]
pub struct CycleError(pub ReaderId);

/// Cache state for a computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Never computed, or a dependency changed since the last run.
    Stale,

    /// The cached value reflects the current inputs.
    Clean,
}

struct Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Source ID other readers see this cache through.
    output_id: u64,

    /// Reader ID this cache records its own dependencies under.
    reader: ReaderId,

    /// The derivation. Must be pure and synchronous.
    compute: Box<dyn Fn() -> T + Send + Sync>,

    /// The cached value (`None` until first computed).
    value: RwLock<Option<T>>,

    state: RwLock<CacheState>,

    /// Source IDs read during the last run.
    dependencies: RwLock<HashSet<u64>>,
}

impl<T> Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn recompute(&self) -> T {
        trace!(reader = ?self.reader, "recomputing");

        // Edges always reflect the latest run only.
        Runtime::clear_dependencies(self.reader);

        let value = {
            let _frame = Tracker::enter(self.reader);
            let value = (self.compute)();
            // Collected before the frame pops. If the derivation panicked we
            // never get here: the frame unwinds, the state stays stale and
            // the next read retries.
            *self.dependencies.write() = Tracker::collected_reads().into_iter().collect();
            value
        };

        *self.value.write() = Some(value.clone());
        *self.state.write() = CacheState::Clean;

        value
    }
}

impl<T> Drop for Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        // Runs when the last handle drops: an unobserved cache holds no
        // state in the runtime either.
        Runtime::unregister(self.reader, self.output_id);
    }
}

impl<T> DerivedNode for Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn reader_id(&self) -> ReaderId {
        self.reader
    }

    fn mark_stale(&self) -> bool {
        let mut state = self.state.write();
        if *state == CacheState::Clean {
            *state = CacheState::Stale;
            true
        } else {
            false
        }
    }

    fn output_id(&self) -> Option<u64> {
        Some(self.output_id)
    }
}

/// A memoized derived value, recomputed only when a tracked input changes.
///
/// Cloning a `Computed` produces another handle to the same cache.
pub struct Computed<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<Inner<T>>,
}

impl<T> Computed<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a new computed cache with the given derivation.
    ///
    /// The derivation does not run here; it runs on first access.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let inner = Arc::new(Inner {
            output_id: next_source_id(),
            reader: ReaderId::new(),
            compute: Box::new(compute),
            value: RwLock::new(None),
            state: RwLock::new(CacheState::Stale),
            dependencies: RwLock::new(HashSet::new()),
        });

        let node: Arc<dyn DerivedNode> = inner.clone();
        Runtime::register(&node);

        Self { inner }
    }

    /// Get the source ID other readers see this cache through.
    pub fn output_id(&self) -> u64 {
        self.inner.output_id
    }

    /// Get the reader ID of this cache.
    pub fn reader_id(&self) -> ReaderId {
        self.inner.reader
    }

    /// Get the current value, recomputing if a dependency changed.
    ///
    /// # Panics
    ///
    /// Panics with a [`CycleError`] message if this cache is read during its
    /// own evaluation.
    pub fn get(&self) -> T {
        // A computed read inside another derivation is itself a dependency.
        if let Some(parent) = Tracker::current_reader() {
            Tracker::record_read(self.inner.output_id);
            Runtime::add_dependency(self.inner.output_id, parent);
        }

        if Tracker::on_stack(self.inner.reader) {
            panic!("{}", CycleError(self.inner.reader));
        }

        let state = *self.inner.state.read();
        if state == CacheState::Clean {
            if let Some(value) = self.inner.value.read().clone() {
                return value;
            }
        }

        self.inner.recompute()
    }

    /// The current cache state.
    pub fn state(&self) -> CacheState {
        *self.inner.state.read()
    }

    /// Check whether the cache holds a value from a previous run.
    pub fn has_value(&self) -> bool {
        self.inner.value.read().is_some()
    }

    /// Number of sources read during the last run.
    pub fn dependency_count(&self) -> usize {
        self.inner.dependencies.read().len()
    }
}

impl<T> Clone for Computed<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Debug for Computed<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("reader", &self.inner.reader)
            .field("state", &self.state())
            .field("has_value", &self.has_value())
            .finish()
    }
}
