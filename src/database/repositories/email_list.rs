use sqlx::{PgConnection, PgExecutor};

use crate::database::manager::DatabaseError;
use crate::database::models::EmailEntry;

pub struct EmailListRepository;

impl EmailListRepository {
    pub async fn list(
        db: impl PgExecutor<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EmailEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, EmailEntry>(
            "SELECT email FROM emaillist ORDER BY email ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: impl PgExecutor<'_>) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM emaillist")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    pub async fn insert(
        db: &mut PgConnection,
        email: &str,
    ) -> Result<EmailEntry, DatabaseError> {
        let row = sqlx::query_as::<_, EmailEntry>(
            "INSERT INTO emaillist (email) VALUES ($1) RETURNING email",
        )
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, email: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM emaillist WHERE email = $1")
            .bind(email)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
