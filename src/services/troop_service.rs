use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Event, Troop, TroopParticipation};
use crate::database::repositories::{EventRepository, TroopRepository, WorkspaceRepository};
use crate::error::ApiError;
use crate::schemas::troop::{TroopCreate, TroopPatch};
use crate::services::on_unique_violation;

pub struct TroopService {
    pool: PgPool,
}

impl TroopService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, troop_id: Uuid) -> Result<Troop, ApiError> {
        TroopRepository::get(&self.pool, troop_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Troop not found"))
    }

    pub async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Troop>), ApiError> {
        let total = TroopRepository::count_for_workspace(&self.pool, workspace_id).await?;
        let items =
            TroopRepository::list_for_workspace(&self.pool, workspace_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create_under_workspace(
        &self,
        workspace_id: Uuid,
        data: TroopCreate,
    ) -> Result<Troop, ApiError> {
        data.validate()?;
        if let Some(body_workspace) = data.workspace_id {
            if body_workspace != workspace_id {
                return Err(ApiError::bad_request(
                    "workspace_id in body does not match path parameter",
                ));
            }
        }
        if WorkspaceRepository::get(&self.pool, workspace_id).await?.is_none() {
            return Err(ApiError::not_found("Workspace not found"));
        }

        let troop = Troop {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            workspace_id,
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TroopRepository::insert(&mut tx, &troop).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(&self, troop_id: Uuid, data: TroopPatch) -> Result<Troop, ApiError> {
        data.validate()?;
        let mut troop = self.get(troop_id).await?;

        if let Some(name) = &data.name {
            troop.name = name.trim().to_string();
        }
        if let Some(workspace_id) = data.workspace_id {
            if WorkspaceRepository::get(&self.pool, workspace_id).await?.is_none() {
                return Err(ApiError::not_found("Workspace not found"));
            }
            troop.workspace_id = workspace_id;
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TroopRepository::update(&mut tx, &troop).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn delete(&self, troop_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = TroopRepository::delete(&mut tx, troop_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Troop not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }

    // ----- participations -----

    pub async fn list_troops_for_event(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Troop>), ApiError> {
        let total = TroopRepository::count_for_event(&self.pool, event_id).await?;
        let items = TroopRepository::list_for_event(&self.pool, event_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn list_events_for_troop(
        &self,
        troop_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Event>), ApiError> {
        let total = EventRepository::count_for_troop(&self.pool, troop_id).await?;
        let items = EventRepository::list_for_troop(&self.pool, troop_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn add_participation(
        &self,
        troop_id: Uuid,
        event_id: Uuid,
    ) -> Result<TroopParticipation, ApiError> {
        self.get(troop_id).await?;
        if EventRepository::get(&self.pool, event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TroopRepository::insert_participation(&mut tx, troop_id, event_id)
            .await
            .map_err(|e| on_unique_violation(e, "Troop already participates in this event"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn remove_participation(
        &self,
        troop_id: Uuid,
        event_id: Uuid,
    ) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = TroopRepository::delete_participation(&mut tx, troop_id, event_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Participation not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
