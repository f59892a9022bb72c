use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentRef, ContentType};

/// Operations on the polymorphic base table. Subtype repositories compose
/// these with their own statements inside the service's transaction.
pub struct ContentRepository;

impl ContentRepository {
    pub async fn get_ref(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<ContentRef>, DatabaseError> {
        let row = sqlx::query_as::<_, ContentRef>(
            "SELECT id, content_type FROM content WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_base(
        db: &mut PgConnection,
        id: Uuid,
        content_type: ContentType,
        name: &str,
        description: Option<&str>,
        public: bool,
        like_count: i32,
        created_at: DateTime<Utc>,
        author_id: Uuid,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO content \
             (id, content_type, name, description, public, like_count, created_at, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(content_type)
        .bind(name)
        .bind(description)
        .bind(public)
        .bind(like_count)
        .bind(created_at)
        .bind(author_id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn update_base(
        db: &mut PgConnection,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        public: bool,
        like_count: i32,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE content SET name = $2, description = $3, public = $4, like_count = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(public)
        .bind(like_count)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a base row; the store cascades to the subtype row, comments,
    /// tag links, likes, and event participations.
    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    // The FK cascade removes subtype rows when base rows go away, but not
    // the other way around. These sweep the base rows of dependent subtypes
    // so a parent delete leaves no orphaned content.

    pub async fn delete_task_content_for_event(
        db: &mut PgConnection,
        event_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM content WHERE id IN (SELECT id FROM tasks WHERE event_id = $1)",
        )
        .bind(event_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_task_content_for_workspace(
        db: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM content WHERE id IN ( \
                 SELECT t.id FROM tasks t \
                 JOIN events e ON e.id = t.event_id \
                 WHERE e.workspace_id = $1)",
        )
        .bind(workspace_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_event_content_for_workspace(
        db: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM content WHERE id IN (SELECT id FROM events WHERE workspace_id = $1)",
        )
        .bind(workspace_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_program_content_for_workspace(
        db: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM content WHERE id IN (SELECT id FROM programs WHERE workspace_id = $1)",
        )
        .bind(workspace_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
