use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Joined view of an event: base content columns plus the subtype columns.
/// `program_id` is NULL for events created directly under a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub start_dt: DateTime<Utc>,
    pub end_dt: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub workspace_id: Uuid,
    pub program_id: Option<Uuid>,
}
