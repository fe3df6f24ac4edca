//! Project membership store.
//!
//! Holds the fetched member lists keyed by project, plus the active project
//! selection. The member list the rest of the graph consumes is the one for
//! the active project.

use indexmap::IndexMap;
use tracing::debug;

use crate::model::ProjectMember;
use crate::reactive::Observable;

/// Owns project membership state.
///
/// The table distinguishes "never fetched" (no entry for the project) from
/// "fetched and empty" (an entry holding an empty list). Consumers that only
/// need "is there data" see both through [`project_members`] returning
/// `None` or `Some(vec![])` respectively.
///
/// [`project_members`]: ProjectMemberStore::project_members
pub struct ProjectMemberStore {
    /// The active project, if any.
    project_id: Observable<Option<String>>,

    /// Fetched member lists keyed by project id, in fetch order.
    members: Observable<IndexMap<String, Vec<ProjectMember>>>,
}

impl ProjectMemberStore {
    pub fn new() -> Self {
        Self {
            project_id: Observable::new(None),
            members: Observable::new(IndexMap::new()),
        }
    }

    /// The active project id (tracked read).
    pub fn project_id(&self) -> Option<String> {
        self.project_id.get()
    }

    /// Select the active project (or none, when navigating away).
    pub fn set_project(&self, project_id: Option<String>) {
        debug!(?project_id, "active project changed");
        self.project_id.set(project_id);
    }

    /// Commit a fetched member list for a project, replacing any previous
    /// list wholesale. An empty list means "loaded, no members".
    pub fn load_members(&self, project_id: impl Into<String>, list: Vec<ProjectMember>) {
        let project_id = project_id.into();
        debug!(%project_id, count = list.len(), "project members loaded");
        self.members.update(|table| {
            let mut table = table.clone();
            table.insert(project_id, list);
            table
        });
    }

    /// Append a member to a project's list (after a successful invite).
    pub fn add_member(&self, project_id: &str, member: ProjectMember) {
        self.members.update(|table| {
            let mut table = table.clone();
            table.entry(project_id.to_string()).or_default().push(member);
            table
        });
    }

    /// Remove a membership from a project's list by membership id.
    pub fn remove_member(&self, project_id: &str, membership_id: &str) {
        self.members.update(|table| {
            let mut table = table.clone();
            if let Some(list) = table.get_mut(project_id) {
                list.retain(|m| m.id != membership_id);
            }
            table
        });
    }

    /// The active project's member list, in source order (tracked read).
    ///
    /// `None` when no project is active or the active project's list was
    /// never loaded; `Some(vec![])` when it loaded empty.
    pub fn project_members(&self) -> Option<Vec<ProjectMember>> {
        let project_id = self.project_id.get()?;
        self.members.get().get(&project_id).cloned()
    }
}

impl Default for ProjectMemberStore {
    fn default() -> Self {
        Self::new()
    }
}
