//! Compass Store
//!
//! This crate provides the reactive store layer for the Compass
//! project-management frontend. It implements:
//!
//! - Reactive primitives (observable fields, computed caches)
//! - Automatic dependency tracking with push-invalidate / pull-recompute
//! - The domain stores backing the views (session user, project membership,
//!   mention derivations for the rich-text editor)
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - `reactive`: observable fields, computed caches and the dependency
//!   tracking runtime
//! - `model`: domain entities shared with the fetch layer
//! - `store`: domain stores and the root store graph
//!
//! Rendering, routing and the fetch layer live outside this crate; they read
//! the stores and commit fetched data through the stores' setters.
//!
//! # Example
//!
//! ```rust
//! use compass_store::model::User;
//! use compass_store::store::RootStore;
//!
//! let root = RootStore::new();
//!
//! // Nobody logged in yet: derived values are empty, not missing.
//! assert!(root.mentions.mention_highlights().is_empty());
//!
//! root.user.set_current_user(User {
//!     id: "u1".into(),
//!     display_name: "Ann".into(),
//!     email: None,
//!     avatar: String::new(),
//!     timezone: None,
//!     is_email_verified: true,
//!     is_onboarded: true,
//! });
//!
//! // The editor sees the change on its next read.
//! assert_eq!(&root.mentions.mention_highlights()[..], ["u1"]);
//! ```

pub mod model;
pub mod reactive;
pub mod store;

pub use reactive::{Computed, Observable};
pub use store::RootStore;
