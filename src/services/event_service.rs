use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Event;
use crate::database::repositories::{
    ContentRepository, EventRepository, ProgramRepository, WorkspaceRepository,
};
use crate::error::ApiError;
use crate::schemas::event::{EventCreate, EventPatch};
use crate::services::NewContent;

pub struct EventService {
    pool: PgPool,
}

impl EventService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, event_id: Uuid) -> Result<Event, ApiError> {
        EventRepository::get(&self.pool, event_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))
    }

    pub async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Event>), ApiError> {
        let total =
            EventRepository::count_for_workspace(&self.pool, workspace_id, date_from, date_to)
                .await?;
        let items = EventRepository::list_for_workspace(
            &self.pool,
            workspace_id,
            date_from,
            date_to,
            limit,
            offset,
        )
        .await?;
        Ok((total, items))
    }

    pub async fn list_for_program(
        &self,
        workspace_id: Uuid,
        program_id: Uuid,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Event>), ApiError> {
        let total = EventRepository::count_for_program(
            &self.pool,
            workspace_id,
            program_id,
            date_from,
            date_to,
        )
        .await?;
        let items = EventRepository::list_for_program(
            &self.pool,
            workspace_id,
            program_id,
            date_from,
            date_to,
            limit,
            offset,
        )
        .await?;
        Ok((total, items))
    }

    pub async fn create_under_workspace(
        &self,
        workspace_id: Uuid,
        author_id: Uuid,
        data: EventCreate,
    ) -> Result<Event, ApiError> {
        data.validate()?;
        if WorkspaceRepository::get(&self.pool, workspace_id).await?.is_none() {
            return Err(ApiError::not_found("Workspace not found"));
        }
        self.insert(workspace_id, None, author_id, data).await
    }

    /// The event inherits the program's workspace
    pub async fn create_under_program(
        &self,
        program_id: Uuid,
        author_id: Uuid,
        data: EventCreate,
    ) -> Result<Event, ApiError> {
        data.validate()?;
        let program = ProgramRepository::get(&self.pool, program_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Program not found"))?;
        self.insert(program.workspace_id, Some(program.id), author_id, data).await
    }

    async fn insert(
        &self,
        workspace_id: Uuid,
        program_id: Option<Uuid>,
        author_id: Uuid,
        data: EventCreate,
    ) -> Result<Event, ApiError> {
        let base = NewContent::from_create(&data.content, author_id);
        let event = Event {
            id: base.id,
            name: base.name,
            description: base.description,
            public: base.public,
            like_count: base.like_count,
            created_at: base.created_at,
            author_id: base.author_id,
            start_dt: data.start_dt,
            end_dt: data.end_dt,
            location: data.location.map(|l| l.trim().to_string()),
            workspace_id,
            program_id,
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        EventRepository::insert(&mut tx, &event).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(event)
    }

    pub async fn update(&self, event_id: Uuid, data: EventPatch) -> Result<Event, ApiError> {
        data.validate()?;
        let mut event = self.get(event_id).await?;

        data.content.apply(
            &mut event.name,
            &mut event.description,
            &mut event.public,
            &mut event.like_count,
        );
        if let Some(start_dt) = data.start_dt {
            event.start_dt = start_dt;
        }
        if let Some(end_dt) = data.end_dt {
            event.end_dt = end_dt;
        }
        if let Some(location) = &data.location {
            event.location = location.as_ref().map(|l| l.trim().to_string());
        }
        if let Some(program_id) = data.program_id {
            match program_id {
                Some(program_id) => {
                    // the program must live in the event's workspace
                    let program = ProgramRepository::get(&self.pool, program_id)
                        .await?
                        .ok_or_else(|| ApiError::not_found("Program not found"))?;
                    if program.workspace_id != event.workspace_id {
                        return Err(ApiError::bad_request(
                            "Program does not belong to the same workspace as the event",
                        ));
                    }
                    event.program_id = Some(program.id);
                }
                None => event.program_id = None,
            }
        }
        if let Some(end_dt) = event.end_dt {
            if end_dt < event.start_dt {
                return Err(ApiError::validation_error(
                    "end_dt must not be before start_dt",
                    None,
                ));
            }
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        EventRepository::update(&mut tx, &event).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(event)
    }

    /// Tasks are content rows of their own, so their base rows are swept in
    /// the same transaction as the event's.
    pub async fn delete(&self, event_id: Uuid) -> Result<(), ApiError> {
        self.get(event_id).await?;
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        ContentRepository::delete_task_content_for_event(&mut tx, event_id).await?;
        ContentRepository::delete(&mut tx, event_id).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
