use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentType, Event};
use crate::database::repositories::ContentRepository;

const SELECT: &str = "SELECT c.id, c.name, c.description, c.public, c.like_count, \
                      c.created_at, c.author_id, e.start_dt, e.end_dt, e.location, \
                      e.workspace_id, e.program_id \
                      FROM content c JOIN events e ON e.id = c.id";

pub struct EventRepository;

impl EventRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        let row = sqlx::query_as::<_, Event>(&format!("{SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    /// Events in a workspace ordered by start time; optional start_dt bounds
    pub async fn list_for_workspace(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, DatabaseError> {
        let rows = sqlx::query_as::<_, Event>(&format!(
            "{SELECT} WHERE e.workspace_id = $1 \
             AND ($2::timestamptz IS NULL OR e.start_dt >= $2) \
             AND ($3::timestamptz IS NULL OR e.start_dt <= $3) \
             ORDER BY e.start_dt ASC LIMIT $4 OFFSET $5"
        ))
        .bind(workspace_id)
        .bind(date_from)
        .bind(date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_workspace(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events \
             WHERE workspace_id = $1 \
             AND ($2::timestamptz IS NULL OR start_dt >= $2) \
             AND ($3::timestamptz IS NULL OR start_dt <= $3)",
        )
        .bind(workspace_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn list_for_program(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        program_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, DatabaseError> {
        let rows = sqlx::query_as::<_, Event>(&format!(
            "{SELECT} WHERE e.workspace_id = $1 AND e.program_id = $2 \
             AND ($3::timestamptz IS NULL OR e.start_dt >= $3) \
             AND ($4::timestamptz IS NULL OR e.start_dt <= $4) \
             ORDER BY e.start_dt ASC LIMIT $5 OFFSET $6"
        ))
        .bind(workspace_id)
        .bind(program_id)
        .bind(date_from)
        .bind(date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_program(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        program_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM events \
             WHERE workspace_id = $1 AND program_id = $2 \
             AND ($3::timestamptz IS NULL OR start_dt >= $3) \
             AND ($4::timestamptz IS NULL OR start_dt <= $4)",
        )
        .bind(workspace_id)
        .bind(program_id)
        .bind(date_from)
        .bind(date_to)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    /// Events a troop participates in, ordered by start time
    pub async fn list_for_troop(
        db: impl PgExecutor<'_>,
        troop_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, DatabaseError> {
        let rows = sqlx::query_as::<_, Event>(&format!(
            "{SELECT} JOIN troop_participations tp ON tp.event_id = e.id \
             WHERE tp.troop_id = $1 ORDER BY e.start_dt ASC LIMIT $2 OFFSET $3"
        ))
        .bind(troop_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_troop(
        db: impl PgExecutor<'_>,
        troop_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM troop_participations WHERE troop_id = $1")
                .bind(troop_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    /// Insert base and subtype rows; call inside a transaction
    pub async fn insert(db: &mut PgConnection, event: &Event) -> Result<(), DatabaseError> {
        ContentRepository::insert_base(
            &mut *db,
            event.id,
            ContentType::Event,
            &event.name,
            event.description.as_deref(),
            event.public,
            event.like_count,
            event.created_at,
            event.author_id,
        )
        .await?;
        sqlx::query(
            "INSERT INTO events (id, start_dt, end_dt, location, workspace_id, program_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(event.id)
        .bind(event.start_dt)
        .bind(event.end_dt)
        .bind(&event.location)
        .bind(event.workspace_id)
        .bind(event.program_id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Write back both halves of a patched event; call inside a transaction.
    /// The owning workspace is immutable.
    pub async fn update(db: &mut PgConnection, event: &Event) -> Result<(), DatabaseError> {
        ContentRepository::update_base(
            &mut *db,
            event.id,
            &event.name,
            event.description.as_deref(),
            event.public,
            event.like_count,
        )
        .await?;
        sqlx::query(
            "UPDATE events SET start_dt = $2, end_dt = $3, location = $4, program_id = $5 \
             WHERE id = $1",
        )
        .bind(event.id)
        .bind(event.start_dt)
        .bind(event.end_dt)
        .bind(&event.location)
        .bind(event.program_id)
        .execute(db)
        .await?;
        Ok(())
    }
}
