use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::MemberRole;

fn default_role() -> MemberRole {
    MemberRole::Viewer
}

/// Body for adding a member to a group or workspace. The parent id may be
/// echoed in the body; the service rejects mismatches with the path.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipCreate {
    pub user_id: Uuid,
    #[serde(default)]
    pub group_id: Option<Uuid>,
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
    #[serde(default = "default_role")]
    pub role: MemberRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipPatch {
    #[serde(default)]
    pub role: Option<MemberRole>,
}
