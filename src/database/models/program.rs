use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Joined view of a program: base content columns plus the subtype columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub workspace_id: Uuid,
    pub image: Option<String>,
}
