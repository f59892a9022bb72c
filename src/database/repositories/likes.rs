use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::UserLikedContent;

pub struct LikeRepository;

impl LikeRepository {
    pub async fn list_for_content(
        db: impl PgExecutor<'_>,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserLikedContent>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserLikedContent>(
            "SELECT user_id, content_id FROM likes WHERE content_id = $1 \
             ORDER BY user_id ASC LIMIT $2 OFFSET $3",
        )
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
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE content_id = $1")
            .bind(content_id)
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn insert(
        db: &mut PgConnection,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<UserLikedContent, DatabaseError> {
        let row = sqlx::query_as::<_, UserLikedContent>(
            "INSERT INTO likes (user_id, content_id) VALUES ($1, $2) \
             RETURNING user_id, content_id",
        )
        .bind(user_id)
        .bind(content_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(
        db: &mut PgConnection,
        user_id: Uuid,
        content_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND content_id = $2")
            .bind(user_id)
            .bind(content_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
