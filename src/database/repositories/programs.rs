use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentType, Program};
use crate::database::repositories::ContentRepository;

const SELECT: &str = "SELECT c.id, c.name, c.description, c.public, c.like_count, \
                      c.created_at, c.author_id, p.workspace_id, p.image \
                      FROM content c JOIN programs p ON p.id = c.id";

pub struct ProgramRepository;

impl ProgramRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Program>, DatabaseError> {
        let row = sqlx::query_as::<_, Program>(&format!("{SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn list_for_workspace(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Program>, DatabaseError> {
        let rows = sqlx::query_as::<_, Program>(&format!(
            "{SELECT} WHERE p.workspace_id = $1 ORDER BY c.name ASC LIMIT $2 OFFSET $3"
        ))
        .bind(workspace_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_workspace(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM programs WHERE workspace_id = $1")
                .bind(workspace_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    /// Insert base and subtype rows; call inside a transaction
    pub async fn insert(db: &mut PgConnection, program: &Program) -> Result<(), DatabaseError> {
        ContentRepository::insert_base(
            &mut *db,
            program.id,
            ContentType::Program,
            &program.name,
            program.description.as_deref(),
            program.public,
            program.like_count,
            program.created_at,
            program.author_id,
        )
        .await?;
        sqlx::query("INSERT INTO programs (id, workspace_id, image) VALUES ($1, $2, $3)")
            .bind(program.id)
            .bind(program.workspace_id)
            .bind(&program.image)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Write back both halves of a patched program; call inside a transaction
    pub async fn update(db: &mut PgConnection, program: &Program) -> Result<(), DatabaseError> {
        ContentRepository::update_base(
            &mut *db,
            program.id,
            &program.name,
            program.description.as_deref(),
            program.public,
            program.like_count,
        )
        .await?;
        sqlx::query("UPDATE programs SET workspace_id = $2, image = $3 WHERE id = $1")
            .bind(program.id)
            .bind(program.workspace_id)
            .bind(&program.image)
            .execute(db)
            .await?;
        Ok(())
    }
}
