//! Domain entities shared between the stores and the fetch layer.
//!
//! Records are immutable from the stores' perspective: a refetch replaces
//! them wholesale, it never patches them in place.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub is_onboarded: bool,
}

/// The slice of workspace state carried on a membership record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub slug: String,
}

/// Role of a member within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberRole {
    Guest,
    Viewer,
    Member,
    Admin,
}

/// Association of a user to a workspace and project.
///
/// Membership is unique per (workspace, project, user); the membership `id`
/// identifies the association itself, not the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: String,
    pub member: User,
    pub workspace: Workspace,
    pub project: String,
    pub role: MemberRole,
}

/// Kind of entity a mention suggestion refers to.
///
/// The suggestion model is polymorphic over mentionable kinds; only the user
/// variant is populated today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentionableKind {
    User,
}

/// A display-ready autocomplete candidate for the editor's mention picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MentionableKind,
    pub title: String,
    pub subtitle: String,
    pub avatar: String,
    pub redirect_uri: String,
}

/// IDs the editor marks as referring to the current user.
///
/// Holds at most one element, so the single slot lives inline.
pub type MentionHighlights = SmallVec<[String; 1]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_suggestion_serializes_kind_as_type() {
        let suggestion = MentionSuggestion {
            id: "u1".into(),
            kind: MentionableKind::User,
            title: "Ann".into(),
            subtitle: "a@x.com".into(),
            avatar: "/a.png".into(),
            redirect_uri: "/acme/profile/u1".into(),
        };

        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["type"], "User");
        assert_eq!(json["redirect_uri"], "/acme/profile/u1");
    }

    #[test]
    fn project_member_deserializes_from_fetch_payload() {
        let payload = serde_json::json!({
            "id": "pm-1",
            "member": {
                "id": "u1",
                "display_name": "Ann",
                "email": "a@x.com",
                "avatar": "/a.png"
            },
            "workspace": { "id": "w1", "slug": "acme" },
            "project": "p1",
            "role": "Member"
        });

        let member: ProjectMember = serde_json::from_value(payload).unwrap();
        assert_eq!(member.member.display_name, "Ann");
        assert_eq!(member.workspace.slug, "acme");
        assert_eq!(member.role, MemberRole::Member);
        assert!(!member.member.is_onboarded);
    }
}
