use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentType, Task};
use crate::database::repositories::ContentRepository;

const SELECT: &str = "SELECT c.id, c.name, c.description, c.public, c.like_count, \
                      c.created_at, c.author_id, t.event_id \
                      FROM content c JOIN tasks t ON t.id = c.id";

pub struct TaskRepository;

impl TaskRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        let row = sqlx::query_as::<_, Task>(&format!("{SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn list_for_event(
        db: impl PgExecutor<'_>,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, DatabaseError> {
        let rows = sqlx::query_as::<_, Task>(&format!(
            "{SELECT} WHERE t.event_id = $1 ORDER BY c.name ASC LIMIT $2 OFFSET $3"
        ))
        .bind(event_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_event(
        db: impl PgExecutor<'_>,
        event_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Insert base and subtype rows; call inside a transaction
    pub async fn insert(db: &mut PgConnection, task: &Task) -> Result<(), DatabaseError> {
        ContentRepository::insert_base(
            &mut *db,
            task.id,
            ContentType::Task,
            &task.name,
            task.description.as_deref(),
            task.public,
            task.like_count,
            task.created_at,
            task.author_id,
        )
        .await?;
        sqlx::query("INSERT INTO tasks (id, event_id) VALUES ($1, $2)")
            .bind(task.id)
            .bind(task.event_id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Tasks only patch base columns; the owning event is immutable
    pub async fn update(db: &mut PgConnection, task: &Task) -> Result<(), DatabaseError> {
        ContentRepository::update_base(
            &mut *db,
            task.id,
            &task.name,
            task.description.as_deref(),
            task.public,
            task.like_count,
        )
        .await?;
        Ok(())
    }
}
