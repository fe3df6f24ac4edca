//! Root store composition.

use std::sync::Arc;

use crate::store::mentions::MentionsStore;
use crate::store::project_member::ProjectMemberStore;
use crate::store::user::UserStore;

/// The composed store graph for one application session.
///
/// Constructed once at application start. Every view shares the graph
/// read-only; mutation goes through each domain store's own setters.
///
/// Stores that derive across store boundaries receive handles to exactly the
/// siblings they read, and defer those reads to computed evaluation, so
/// construction order only has to put owned state before derivations.
pub struct RootStore {
    pub user: Arc<UserStore>,
    pub project_member: Arc<ProjectMemberStore>,
    pub mentions: MentionsStore,
}

impl RootStore {
    pub fn new() -> Self {
        let user = Arc::new(UserStore::new());
        let project_member = Arc::new(ProjectMemberStore::new());
        let mentions = MentionsStore::new(Arc::clone(&user), Arc::clone(&project_member));

        Self {
            user,
            project_member,
            mentions,
        }
    }
}

impl Default for RootStore {
    fn default() -> Self {
        Self::new()
    }
}
