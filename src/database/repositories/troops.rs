use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Troop, TroopParticipation};

pub struct TroopRepository;

impl TroopRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Troop>, DatabaseError> {
        let row = sqlx::query_as::<_, Troop>(
            "SELECT id, name, workspace_id FROM troops WHERE id = $1",
        )
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
    ) -> Result<Vec<Troop>, DatabaseError> {
        let rows = sqlx::query_as::<_, Troop>(
            "SELECT id, name, workspace_id FROM troops \
             WHERE workspace_id = $1 ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
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
            sqlx::query_scalar("SELECT COUNT(*) FROM troops WHERE workspace_id = $1")
                .bind(workspace_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn insert(db: &mut PgConnection, troop: &Troop) -> Result<Troop, DatabaseError> {
        let row = sqlx::query_as::<_, Troop>(
            "INSERT INTO troops (id, name, workspace_id) VALUES ($1, $2, $3) \
             RETURNING id, name, workspace_id",
        )
        .bind(troop.id)
        .bind(&troop.name)
        .bind(troop.workspace_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &mut PgConnection, troop: &Troop) -> Result<Troop, DatabaseError> {
        let row = sqlx::query_as::<_, Troop>(
            "UPDATE troops SET name = $2, workspace_id = $3 WHERE id = $1 \
             RETURNING id, name, workspace_id",
        )
        .bind(troop.id)
        .bind(&troop.name)
        .bind(troop.workspace_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM troops WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    // ----- participations -----

    pub async fn insert_participation(
        db: &mut PgConnection,
        troop_id: Uuid,
        event_id: Uuid,
    ) -> Result<TroopParticipation, DatabaseError> {
        let row = sqlx::query_as::<_, TroopParticipation>(
            "INSERT INTO troop_participations (troop_id, event_id) VALUES ($1, $2) \
             RETURNING troop_id, event_id",
        )
        .bind(troop_id)
        .bind(event_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_participation(
        db: &mut PgConnection,
        troop_id: Uuid,
        event_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM troop_participations WHERE troop_id = $1 AND event_id = $2",
        )
        .bind(troop_id)
        .bind(event_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Troops attending an event, ordered by name
    pub async fn list_for_event(
        db: impl PgExecutor<'_>,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Troop>, DatabaseError> {
        let rows = sqlx::query_as::<_, Troop>(
            "SELECT t.id, t.name, t.workspace_id FROM troops t \
             JOIN troop_participations tp ON tp.troop_id = t.id \
             WHERE tp.event_id = $1 ORDER BY t.name ASC LIMIT $2 OFFSET $3",
        )
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
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM troop_participations WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }
}
