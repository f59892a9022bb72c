use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{MemberRole, Workspace, WorkspaceMembership};
use crate::database::repositories::{
    ContentRepository, GroupRepository, UserRepository, WorkspaceRepository,
};
use crate::error::ApiError;
use crate::schemas::membership::{MembershipCreate, MembershipPatch};
use crate::schemas::workspace::{first_monday_of_september, WorkspaceCreate, WorkspacePatch};
use crate::services::on_unique_violation;

pub struct WorkspaceService {
    pool: PgPool,
}

impl WorkspaceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, workspace_id: Uuid) -> Result<Workspace, ApiError> {
        WorkspaceRepository::get(&self.pool, workspace_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Workspace not found"))
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Workspace>), ApiError> {
        let total = WorkspaceRepository::count_for_user(&self.pool, user_id).await?;
        let items = WorkspaceRepository::list_for_user(&self.pool, user_id, limit, offset).await?;
        Ok((total, items))
    }

    /// Create a workspace and its owner membership in one transaction
    pub async fn create_for_user(
        &self,
        user_id: Uuid,
        data: WorkspaceCreate,
    ) -> Result<Workspace, ApiError> {
        data.validate()?;

        if UserRepository::get(&self.pool, user_id).await?.is_none() {
            return Err(ApiError::not_found("User not found"));
        }
        if let Some(group_id) = data.group_id {
            if GroupRepository::get(&self.pool, group_id).await?.is_none() {
                return Err(ApiError::not_found("Group not found"));
            }
        }

        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            default_meeting_weekday: data.default_meeting_weekday,
            default_start_time: data.default_start_time,
            default_end_time: data.default_end_time,
            default_interval: data.default_interval,
            season_start: data.season_start.unwrap_or_else(first_monday_of_september),
            settings: data.settings,
            group_id: data.group_id,
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = WorkspaceRepository::insert(&mut tx, &workspace).await?;
        let membership = WorkspaceMembership {
            workspace_id: row.id,
            user_id,
            role: MemberRole::Owner,
        };
        WorkspaceRepository::insert_membership(&mut tx, &membership).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(
        &self,
        workspace_id: Uuid,
        data: WorkspacePatch,
    ) -> Result<Workspace, ApiError> {
        data.validate()?;
        let mut workspace = self.get(workspace_id).await?;

        if let Some(name) = &data.name {
            workspace.name = name.trim().to_string();
        }
        if let Some(weekday) = data.default_meeting_weekday {
            workspace.default_meeting_weekday = weekday;
        }
        if let Some(start) = data.default_start_time {
            workspace.default_start_time = start;
        }
        if let Some(end) = data.default_end_time {
            workspace.default_end_time = end;
        }
        if let Some(interval) = data.default_interval {
            workspace.default_interval = interval;
        }
        if let Some(season_start) = data.season_start {
            workspace.season_start = season_start;
        }
        if let Some(settings) = &data.settings {
            workspace.settings = settings.clone();
        }
        if let Some(group_id) = data.group_id {
            if let Some(group_id) = group_id {
                if GroupRepository::get(&self.pool, group_id).await?.is_none() {
                    return Err(ApiError::not_found("Group not found"));
                }
            }
            workspace.group_id = group_id;
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = WorkspaceRepository::update(&mut tx, &workspace).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    /// Delete a workspace and everything under it. Content base rows of the
    /// workspace's programs, events, and tasks are swept explicitly; the FK
    /// cascade handles the rest (troops, memberships, links).
    pub async fn delete(&self, workspace_id: Uuid) -> Result<(), ApiError> {
        self.get(workspace_id).await?;

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        ContentRepository::delete_task_content_for_workspace(&mut tx, workspace_id).await?;
        ContentRepository::delete_event_content_for_workspace(&mut tx, workspace_id).await?;
        ContentRepository::delete_program_content_for_workspace(&mut tx, workspace_id).await?;
        WorkspaceRepository::delete(&mut tx, workspace_id).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }

    // ----- memberships -----

    pub async fn list_members(
        &self,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<WorkspaceMembership>), ApiError> {
        self.get(workspace_id).await?;
        let total = WorkspaceRepository::count_memberships(&self.pool, workspace_id).await?;
        let items =
            WorkspaceRepository::list_memberships(&self.pool, workspace_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn add_member(
        &self,
        workspace_id: Uuid,
        data: MembershipCreate,
    ) -> Result<WorkspaceMembership, ApiError> {
        if let Some(body_workspace) = data.workspace_id {
            if body_workspace != workspace_id {
                return Err(ApiError::bad_request(
                    "workspace_id in body does not match path parameter",
                ));
            }
        }
        self.get(workspace_id).await?;

        let membership = WorkspaceMembership { workspace_id, user_id: data.user_id, role: data.role };
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = WorkspaceRepository::insert_membership(&mut tx, &membership)
            .await
            .map_err(|e| on_unique_violation(e, "User is already a member of this workspace"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update_member(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
        data: MembershipPatch,
    ) -> Result<WorkspaceMembership, ApiError> {
        let mut membership =
            WorkspaceRepository::get_membership(&self.pool, workspace_id, user_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Membership not found"))?;

        if let Some(role) = data.role {
            membership.role = role;
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = WorkspaceRepository::update_membership(&mut tx, &membership).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn remove_member(&self, workspace_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted =
            WorkspaceRepository::delete_membership(&mut tx, workspace_id, user_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Membership not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
