//! Reader identity for the reactive system.
//!
//! A reader is any computation that consumes tracked state and must be
//! invalidated when that state changes. In this crate the only readers are
//! computed caches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a reader.
///
/// Each computed cache gets a unique ID when created. The ID is used to
/// record dependency edges and to detect re-entrant evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReaderId(u64);

impl ReaderId {
    /// Generate a new unique reader ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ReaderId {
    fn default() -> Self {
        Self::new()
    }
}
