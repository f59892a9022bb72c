use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Comment;

const COLUMNS: &str = "id, body, user_id, content_id, created_at";

pub struct CommentRepository;

impl CommentRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Comment>, DatabaseError> {
        let row = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Newest first; id breaks ties for a stable ordering
    pub async fn list_for_content(
        db: impl PgExecutor<'_>,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let rows = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COLUMNS} FROM comments WHERE content_id = $1 \
             ORDER BY created_at DESC, id ASC LIMIT $2 OFFSET $3"
        ))
        .bind(content_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_content(
        db: impl PgExecutor<'_>,
        content_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE content_id = $1")
                .bind(content_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn insert(db: &mut PgConnection, comment: &Comment) -> Result<Comment, DatabaseError> {
        let row = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (id, body, user_id, content_id, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(comment.id)
        .bind(&comment.body)
        .bind(comment.user_id)
        .bind(comment.content_id)
        .bind(comment.created_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Only the body is mutable
    pub async fn update(db: &mut PgConnection, comment: &Comment) -> Result<Comment, DatabaseError> {
        let row = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET body = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(comment.id)
        .bind(&comment.body)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
