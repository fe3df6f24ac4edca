//! Domain stores.
//!
//! Each store owns one cohesive slice of application state as observable
//! fields and exposes derived values as computed caches. [`RootStore`]
//! composes them for one session.

pub mod mentions;
pub mod project_member;
pub mod root;
pub mod user;

pub use mentions::MentionsStore;
pub use project_member::ProjectMemberStore;
pub use root::RootStore;
pub use user::UserStore;
