use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Workspace, WorkspaceMembership};

const COLUMNS: &str = "id, name, default_meeting_weekday, default_start_time, \
                       default_end_time, default_interval, season_start, settings, group_id";

pub struct WorkspaceRepository;

impl WorkspaceRepository {
    pub async fn get(
        db: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Workspace>, DatabaseError> {
        let row = sqlx::query_as::<_, Workspace>(&format!(
            "SELECT {COLUMNS} FROM workspaces WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Workspaces the user is a member of, ordered by name
    pub async fn list_for_user(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Workspace>, DatabaseError> {
        let rows = sqlx::query_as::<_, Workspace>(
            "SELECT w.id, w.name, w.default_meeting_weekday, w.default_start_time, \
             w.default_end_time, w.default_interval, w.season_start, w.settings, w.group_id \
             FROM workspaces w \
             JOIN workspace_memberships wm ON wm.workspace_id = w.id \
             WHERE wm.user_id = $1 ORDER BY w.name ASC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_user(
        db: impl PgExecutor<'_>,
        user_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workspace_memberships WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn insert(
        db: &mut PgConnection,
        workspace: &Workspace,
    ) -> Result<Workspace, DatabaseError> {
        let row = sqlx::query_as::<_, Workspace>(&format!(
            "INSERT INTO workspaces \
             (id, name, default_meeting_weekday, default_start_time, default_end_time, \
              default_interval, season_start, settings, group_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {COLUMNS}"
        ))
        .bind(workspace.id)
        .bind(&workspace.name)
        .bind(workspace.default_meeting_weekday)
        .bind(workspace.default_start_time)
        .bind(workspace.default_end_time)
        .bind(workspace.default_interval)
        .bind(workspace.season_start)
        .bind(&workspace.settings)
        .bind(workspace.group_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &mut PgConnection,
        workspace: &Workspace,
    ) -> Result<Workspace, DatabaseError> {
        let row = sqlx::query_as::<_, Workspace>(&format!(
            "UPDATE workspaces SET name = $2, default_meeting_weekday = $3, \
             default_start_time = $4, default_end_time = $5, default_interval = $6, \
             season_start = $7, settings = $8, group_id = $9 \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(workspace.id)
        .bind(&workspace.name)
        .bind(workspace.default_meeting_weekday)
        .bind(workspace.default_start_time)
        .bind(workspace.default_end_time)
        .bind(workspace.default_interval)
        .bind(workspace.season_start)
        .bind(&workspace.settings)
        .bind(workspace.group_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    // ----- memberships -----

    pub async fn get_membership(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<WorkspaceMembership>, DatabaseError> {
        let row = sqlx::query_as::<_, WorkspaceMembership>(
            "SELECT workspace_id, user_id, role FROM workspace_memberships \
             WHERE workspace_id = $1 AND user_id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_memberships(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WorkspaceMembership>, DatabaseError> {
        let rows = sqlx::query_as::<_, WorkspaceMembership>(
            "SELECT workspace_id, user_id, role FROM workspace_memberships \
             WHERE workspace_id = $1 ORDER BY user_id ASC LIMIT $2 OFFSET $3",
        )
        .bind(workspace_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_memberships(
        db: impl PgExecutor<'_>,
        workspace_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workspace_memberships WHERE workspace_id = $1",
        )
        .bind(workspace_id)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn insert_membership(
        db: &mut PgConnection,
        membership: &WorkspaceMembership,
    ) -> Result<WorkspaceMembership, DatabaseError> {
        let row = sqlx::query_as::<_, WorkspaceMembership>(
            "INSERT INTO workspace_memberships (workspace_id, user_id, role) \
             VALUES ($1, $2, $3) RETURNING workspace_id, user_id, role",
        )
        .bind(membership.workspace_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update_membership(
        db: &mut PgConnection,
        membership: &WorkspaceMembership,
    ) -> Result<WorkspaceMembership, DatabaseError> {
        let row = sqlx::query_as::<_, WorkspaceMembership>(
            "UPDATE workspace_memberships SET role = $3 \
             WHERE workspace_id = $1 AND user_id = $2 \
             RETURNING workspace_id, user_id, role",
        )
        .bind(membership.workspace_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_membership(
        db: &mut PgConnection,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM workspace_memberships WHERE workspace_id = $1 AND user_id = $2",
        )
        .bind(workspace_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}
