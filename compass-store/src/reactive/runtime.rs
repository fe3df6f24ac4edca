//! Reactive runtime.
//!
//! The runtime is the central coordinator between observables and computed
//! caches. It owns the dependency edge table and propagates invalidation when
//! a source changes.
//!
//! # How it works
//!
//! 1. While a derivation runs, every source it reads registers an edge
//!    `source -> reader` with the runtime.
//!
//! 2. When an observable's value changes, the runtime walks the edge table
//!    and marks every transitive dependent stale. A computed cache that
//!    transitions to stale forwards the wave through its own output ID, so a
//!    computed reading another computed is invalidated in the same pass.
//!
//! 3. Nothing recomputes here. Staleness is pushed; recomputation is pulled
//!    by the next read. This keeps a burst of mutations from triggering a
//!    cascade of synchronous recomputation.
//!
//! # Thread safety
//!
//! The edge table and reader registry are global concurrent maps. The
//! tracking frames themselves are thread-local, so the common single-threaded
//! case takes no cross-thread locks on the read path beyond the map shards.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, Weak};

use dashmap::DashMap;
use tracing::trace;

use super::reader::ReaderId;

/// Counter shared by observables and computed outputs.
static SOURCE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique source ID.
pub(crate) fn next_source_id() -> u64 {
    SOURCE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A node that derives its value from tracked sources and can go stale.
pub trait DerivedNode: Send + Sync {
    /// The reader ID this node records its dependencies under.
    fn reader_id(&self) -> ReaderId;

    /// Mark the node stale. Returns `true` only on a clean-to-stale
    /// transition; an already-stale node has already propagated.
    fn mark_stale(&self) -> bool;

    /// The source ID other readers see this node through, if it produces a
    /// readable value.
    fn output_id(&self) -> Option<u64>;
}

// Edge table: source ID -> readers that consumed it in their last run.
static EDGES: OnceLock<DashMap<u64, Vec<ReaderId>>> = OnceLock::new();
// Registry of live derived nodes, held weakly so drop works naturally.
static REGISTRY: OnceLock<DashMap<ReaderId, Weak<dyn DerivedNode>>> = OnceLock::new();

fn edges() -> &'static DashMap<u64, Vec<ReaderId>> {
    EDGES.get_or_init(DashMap::new)
}

fn registry() -> &'static DashMap<ReaderId, Weak<dyn DerivedNode>> {
    REGISTRY.get_or_init(DashMap::new)
}

/// The global reactive runtime.
pub struct Runtime;

impl Runtime {
    /// Register a derived node so invalidation can reach it.
    ///
    /// The registration is weak; entries whose node has been dropped are
    /// pruned during notification.
    pub fn register(node: &std::sync::Arc<dyn DerivedNode>) {
        registry().insert(node.reader_id(), std::sync::Arc::downgrade(node));
    }

    /// Record that `reader` depends on `source_id`.
    ///
    /// Called by sources when read inside a tracking frame.
    pub fn add_dependency(source_id: u64, reader: ReaderId) {
        let mut entry = edges().entry(source_id).or_default();
        if !entry.contains(&reader) {
            entry.push(reader);
        }
    }

    /// Drop every edge pointing at `reader`.
    ///
    /// Called before a derivation re-runs, so the edge set always reflects
    /// the sources actually read in the latest run. A branch that stopped
    /// reading a source stops being invalidated by it.
    pub fn clear_dependencies(reader: ReaderId) {
        for mut entry in edges().iter_mut() {
            entry.value_mut().retain(|r| *r != reader);
        }
    }

    /// Remove a reader that no longer exists.
    ///
    /// Called when the last handle to a computed cache drops: scrubs the
    /// reader from every edge vector, drops the edge entry keyed by its
    /// output, and removes its registration. A dropped cache leaves nothing
    /// behind for future notifications to walk.
    pub(crate) fn unregister(reader: ReaderId, output_id: u64) {
        registry().remove(&reader);
        edges().remove(&output_id);
        Self::clear_dependencies(reader);
    }

    /// Push staleness to everything that transitively depends on a source.
    pub fn notify_change(source_id: u64) {
        trace!(source_id, "source changed");

        let mut queue = VecDeque::from([source_id]);
        let mut visited: HashSet<ReaderId> = HashSet::new();

        while let Some(changed) = queue.pop_front() {
            let readers = edges()
                .get(&changed)
                .map(|entry| entry.value().clone())
                .unwrap_or_default();

            for reader in readers {
                if !visited.insert(reader) {
                    continue;
                }

                // An upgrade can only fail mid-drop on another thread; the
                // drop itself scrubs the entry.
                let node = registry().get(&reader).and_then(|weak| weak.upgrade());
                let Some(node) = node else {
                    continue;
                };

                if node.mark_stale() {
                    trace!(?reader, "marked stale");
                    if let Some(output) = node.output_id() {
                        queue.push_back(output);
                    }
                }
            }
        }
    }
}
