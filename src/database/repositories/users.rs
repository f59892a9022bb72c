use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

const COLUMNS: &str = "id, name, email, auth0_id, pronouns";

pub struct UserRepository;

impl UserRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn get_by_auth0_id(
        db: impl PgExecutor<'_>,
        auth0_id: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users WHERE auth0_id = $1"
        ))
        .bind(auth0_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// List users ordered by name; `q` matches name/email/auth0_id substrings
    pub async fn list(
        db: impl PgExecutor<'_>,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, DatabaseError> {
        let pattern = q.map(|q| format!("%{}%", q.trim()));
        let rows = sqlx::query_as::<_, User>(&format!(
            "SELECT {COLUMNS} FROM users \
             WHERE $1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR auth0_id ILIKE $1 \
             ORDER BY name ASC LIMIT $2 OFFSET $3"
        ))
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: impl PgExecutor<'_>, q: Option<&str>) -> Result<i64, DatabaseError> {
        let pattern = q.map(|q| format!("%{}%", q.trim()));
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE $1::text IS NULL OR name ILIKE $1 OR email ILIKE $1 OR auth0_id ILIKE $1",
        )
        .bind(pattern)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn insert(db: &mut PgConnection, user: &User) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, auth0_id, pronouns) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.auth0_id)
        .bind(&user.pronouns)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Insert unless a row with the same auth0_id already exists. Returns
    /// None when another request won the race.
    pub async fn insert_if_absent(
        db: &mut PgConnection,
        user: &User,
    ) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, name, email, auth0_id, pronouns) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (auth0_id) DO NOTHING RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.auth0_id)
        .bind(&user.pronouns)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &mut PgConnection, user: &User) -> Result<User, DatabaseError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = $2, email = $3, auth0_id = $4, pronouns = $5 \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.auth0_id)
        .bind(&user.pronouns)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
