//! Reactive primitives.
//!
//! This module implements the dependency-tracking computation cache the
//! store layer is built on: observable fields and computed caches.
//!
//! # Concepts
//!
//! ## Observables
//!
//! An [`Observable`] is a container for mutable state. When it is read while
//! a derivation is running, the observable registers that derivation as a
//! dependent. When the value changes, all dependents are marked stale.
//!
//! ## Computed caches
//!
//! A [`Computed`] is a derived value that memoizes its result. It re-runs its
//! derivation only when one of the sources it actually read has changed, no
//! matter how many readers request the value in between.
//!
//! # Invalidation protocol
//!
//! Staleness is pushed eagerly when a source changes; recomputation is pulled
//! lazily by the next read. A burst of mutations in one update therefore
//! costs at most one recomputation per cache, on its next read.
//!
//! Dependencies are detected automatically through a thread-local tracking
//! frame, the approach used by fine-grained reactive UI runtimes.

mod computed;
mod observable;
mod reader;
mod runtime;
mod tracker;

pub use computed::{CacheState, Computed, CycleError};
pub use observable::Observable;
pub use reader::ReaderId;
pub use runtime::{DerivedNode, Runtime};
pub use tracker::Tracker;
