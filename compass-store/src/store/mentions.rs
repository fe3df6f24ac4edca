//! Mention derivations for the rich-text editor.
//!
//! This store owns no observable state of its own; both values are computed
//! caches over sibling stores and recompute only when those change.

use std::sync::Arc;

use smallvec::smallvec;

use crate::model::{MentionHighlights, MentionSuggestion, MentionableKind};
use crate::reactive::Computed;
use crate::store::project_member::ProjectMemberStore;
use crate::store::user::UserStore;

/// Projects sibling state into editor-ready shapes.
///
/// The editor re-reads both accessors on every render cycle; reads are cache
/// hits unless membership or the session user changed in between.
pub struct MentionsStore {
    suggestions: Computed<Vec<MentionSuggestion>>,
    highlights: Computed<MentionHighlights>,
}

impl MentionsStore {
    /// Build the derivations over the sibling stores this store reads.
    ///
    /// Siblings are only read at evaluation time, never here, so construction
    /// order inside the root store stays a non-issue.
    pub fn new(users: Arc<UserStore>, members: Arc<ProjectMemberStore>) -> Self {
        let suggestions = Computed::new(move || {
            let Some(list) = members.project_members() else {
                // Membership not loaded yet: no candidates, not an error.
                return Vec::new();
            };

            list.iter()
                .map(|membership| MentionSuggestion {
                    id: membership.member.id.clone(),
                    kind: MentionableKind::User,
                    title: membership.member.display_name.clone(),
                    subtitle: membership.member.email.clone().unwrap_or_default(),
                    avatar: membership.member.avatar.clone(),
                    redirect_uri: format!(
                        "/{}/profile/{}",
                        membership.workspace.slug, membership.member.id
                    ),
                })
                .collect()
        });

        let highlights = Computed::new(move || match users.current_user() {
            Some(user) => smallvec![user.id],
            None => MentionHighlights::new(),
        });

        Self {
            suggestions,
            highlights,
        }
    }

    /// Autocomplete candidates, one per known project member, in source
    /// order. Empty when membership is unknown. Search-filtering by the typed
    /// query is the surrounding UI's job.
    pub fn mention_suggestions(&self) -> Vec<MentionSuggestion> {
        self.suggestions.get()
    }

    /// IDs the editor renders as "you": the current user's id, or empty when
    /// unauthenticated.
    pub fn mention_highlights(&self) -> MentionHighlights {
        self.highlights.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberRole, ProjectMember, User, Workspace};

    fn stores() -> (Arc<UserStore>, Arc<ProjectMemberStore>, MentionsStore) {
        let users = Arc::new(UserStore::new());
        let members = Arc::new(ProjectMemberStore::new());
        let mentions = MentionsStore::new(Arc::clone(&users), Arc::clone(&members));
        (users, members, mentions)
    }

    fn member(user_id: &str, name: &str, email: Option<&str>) -> ProjectMember {
        ProjectMember {
            id: format!("pm-{user_id}"),
            member: User {
                id: user_id.into(),
                display_name: name.into(),
                email: email.map(Into::into),
                avatar: format!("/{user_id}.png"),
                timezone: None,
                is_email_verified: true,
                is_onboarded: true,
            },
            workspace: Workspace {
                id: "w1".into(),
                slug: "acme".into(),
            },
            project: "p1".into(),
            role: MemberRole::Member,
        }
    }

    #[test]
    fn one_suggestion_per_member_in_source_order() {
        let (_users, members, mentions) = stores();
        members.set_project(Some("p1".into()));
        members.load_members(
            "p1",
            vec![
                member("u1", "Ann", Some("a@x.com")),
                member("u2", "Ben", None),
                member("u3", "Cyn", Some("c@x.com")),
            ],
        );

        let suggestions = mentions.mention_suggestions();
        let ids: Vec<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn missing_email_becomes_empty_subtitle() {
        let (_users, members, mentions) = stores();
        members.set_project(Some("p1".into()));
        members.load_members("p1", vec![member("u2", "Ben", None)]);

        let suggestions = mentions.mention_suggestions();
        assert_eq!(suggestions[0].subtitle, "");
    }

    #[test]
    fn unknown_membership_yields_empty_suggestions() {
        let (_users, members, mentions) = stores();

        assert!(mentions.mention_suggestions().is_empty());

        // Loaded-but-empty also yields an empty sequence.
        members.set_project(Some("p1".into()));
        members.load_members("p1", vec![]);
        assert!(mentions.mention_suggestions().is_empty());
    }

    #[test]
    fn highlights_follow_the_session_user() {
        let (users, _members, mentions) = stores();

        assert!(mentions.mention_highlights().is_empty());

        users.set_current_user(User {
            id: "u2".into(),
            display_name: "Ben".into(),
            email: None,
            avatar: String::new(),
            timezone: None,
            is_email_verified: false,
            is_onboarded: false,
        });
        assert_eq!(&mentions.mention_highlights()[..], ["u2"]);

        users.clear_current_user();
        assert!(mentions.mention_highlights().is_empty());
    }
}
