use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::Comment;
use crate::database::repositories::{CommentRepository, ContentRepository};
use crate::error::ApiError;
use crate::schemas::comment::{CommentCreate, CommentPatch};

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, comment_id: Uuid) -> Result<Comment, ApiError> {
        CommentRepository::get(&self.pool, comment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Comment not found"))
    }

    pub async fn list_for_content(
        &self,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Comment>), ApiError> {
        let total = CommentRepository::count_for_content(&self.pool, content_id).await?;
        let items =
            CommentRepository::list_for_content(&self.pool, content_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create_under_content(
        &self,
        content_id: Uuid,
        author_id: Uuid,
        data: CommentCreate,
    ) -> Result<Comment, ApiError> {
        data.validate()?;
        if let Some(body_content) = data.content_id {
            if body_content != content_id {
                return Err(ApiError::bad_request(
                    "content_id in body does not match path parameter",
                ));
            }
        }
        if ContentRepository::get_ref(&self.pool, content_id).await?.is_none() {
            return Err(ApiError::not_found("Content not found"));
        }

        let comment = Comment {
            id: Uuid::new_v4(),
            body: data.body.trim().to_string(),
            user_id: data.user_id.unwrap_or(author_id),
            content_id,
            created_at: data.created_at.unwrap_or_else(Utc::now),
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = CommentRepository::insert(&mut tx, &comment).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(&self, comment_id: Uuid, data: CommentPatch) -> Result<Comment, ApiError> {
        data.validate()?;
        let mut comment = self.get(comment_id).await?;
        comment.body = data.body.trim().to_string();

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = CommentRepository::update(&mut tx, &comment).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn delete(&self, comment_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = CommentRepository::delete(&mut tx, comment_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Comment not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
