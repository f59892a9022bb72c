use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Task;
use crate::database::repositories::{ContentRepository, EventRepository, TaskRepository};
use crate::error::ApiError;
use crate::schemas::task::{TaskCreate, TaskPatch};
use crate::services::NewContent;

pub struct TaskService {
    pool: PgPool,
}

impl TaskService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, task_id: Uuid) -> Result<Task, ApiError> {
        TaskRepository::get(&self.pool, task_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Task not found"))
    }

    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Task>), ApiError> {
        let total = TaskRepository::count_for_event(&self.pool, event_id).await?;
        let items = TaskRepository::list_for_event(&self.pool, event_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create_under_event(
        &self,
        event_id: Uuid,
        author_id: Uuid,
        data: TaskCreate,
    ) -> Result<Task, ApiError> {
        data.validate()?;
        if EventRepository::get(&self.pool, event_id).await?.is_none() {
            return Err(ApiError::not_found("Event not found"));
        }

        let base = NewContent::from_create(&data.content, author_id);
        let task = Task {
            id: base.id,
            name: base.name,
            description: base.description,
            public: base.public,
            like_count: base.like_count,
            created_at: base.created_at,
            author_id: base.author_id,
            event_id,
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        TaskRepository::insert(&mut tx, &task).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(task)
    }

    pub async fn update(&self, task_id: Uuid, data: TaskPatch) -> Result<Task, ApiError> {
        data.validate()?;
        let mut task = self.get(task_id).await?;

        data.content.apply(
            &mut task.name,
            &mut task.description,
            &mut task.public,
            &mut task.like_count,
        );

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        TaskRepository::update(&mut tx, &task).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(task)
    }

    pub async fn delete(&self, task_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = ContentRepository::delete(&mut tx, task_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Task not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
