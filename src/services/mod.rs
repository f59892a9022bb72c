//! Service layer: orchestrates repositories, enforces cross-entity
//! invariants, owns transaction boundaries, and translates persistence
//! outcomes into the API error taxonomy.

pub mod comment_service;
pub mod email_list_service;
pub mod event_service;
pub mod group_service;
pub mod like_service;
pub mod program_service;
pub mod tag_service;
pub mod task_service;
pub mod troop_service;
pub mod user_service;
pub mod workspace_service;

pub use comment_service::CommentService;
pub use email_list_service::EmailListService;
pub use event_service::EventService;
pub use group_service::GroupService;
pub use like_service::LikeService;
pub use program_service::ProgramService;
pub use tag_service::TagService;
pub use task_service::TaskService;
pub use troop_service::TroopService;
pub use user_service::UserService;
pub use workspace_service::WorkspaceService;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::schemas::content::ContentCreate;

/// Replace the generic unique-violation translation with an entity-specific
/// conflict message; everything else passes through unchanged.
pub(crate) fn on_unique_violation(err: DatabaseError, message: &str) -> ApiError {
    use sqlx::error::DatabaseError as _;

    if let DatabaseError::Sqlx(sqlx::Error::Database(db_err)) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return ApiError::conflict(message);
        }
    }
    err.into()
}

/// Base column values for a new content row
pub(crate) struct NewContent {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

impl NewContent {
    /// Fresh id, trimmed strings, author defaulting to the request's user
    pub fn from_create(data: &ContentCreate, current_user: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            description: data.description.as_ref().map(|d| d.trim().to_string()),
            public: data.public,
            like_count: data.like_count,
            created_at: data.created_at.unwrap_or_else(Utc::now),
            author_id: data.author_id.unwrap_or(current_user),
        }
    }
}
