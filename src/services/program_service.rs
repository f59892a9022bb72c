use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Program;
use crate::database::repositories::{ContentRepository, ProgramRepository, WorkspaceRepository};
use crate::error::ApiError;
use crate::schemas::program::{ProgramCreate, ProgramPatch};
use crate::services::NewContent;

pub struct ProgramService {
    pool: PgPool,
}

impl ProgramService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, program_id: Uuid) -> Result<Program, ApiError> {
        ProgramRepository::get(&self.pool, program_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Program not found"))
    }

    pub async fn list_for_workspace(
        &self,
        workspace_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Program>), ApiError> {
        let total = ProgramRepository::count_for_workspace(&self.pool, workspace_id).await?;
        let items =
            ProgramRepository::list_for_workspace(&self.pool, workspace_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create_under_workspace(
        &self,
        workspace_id: Uuid,
        author_id: Uuid,
        data: ProgramCreate,
    ) -> Result<Program, ApiError> {
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

        let base = NewContent::from_create(&data.content, author_id);
        let program = Program {
            id: base.id,
            name: base.name,
            description: base.description,
            public: base.public,
            like_count: base.like_count,
            created_at: base.created_at,
            author_id: base.author_id,
            workspace_id,
            image: data.image.map(|i| i.trim().to_string()),
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        ProgramRepository::insert(&mut tx, &program).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(program)
    }

    pub async fn update(
        &self,
        program_id: Uuid,
        data: ProgramPatch,
    ) -> Result<Program, ApiError> {
        data.validate()?;
        let mut program = self.get(program_id).await?;

        data.content.apply(
            &mut program.name,
            &mut program.description,
            &mut program.public,
            &mut program.like_count,
        );
        if let Some(image) = &data.image {
            program.image = image.as_ref().map(|i| i.trim().to_string());
        }
        if let Some(workspace_id) = data.workspace_id {
            if WorkspaceRepository::get(&self.pool, workspace_id).await?.is_none() {
                return Err(ApiError::not_found("Workspace not found"));
            }
            program.workspace_id = workspace_id;
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        ProgramRepository::update(&mut tx, &program).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(program)
    }

    /// Deleting the base row cascades to the subtype row, comments, tag
    /// links, and likes; events keep running with a detached program.
    pub async fn delete(&self, program_id: Uuid) -> Result<(), ApiError> {
        self.get(program_id).await?;
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        ContentRepository::delete(&mut tx, program_id).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
