use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::UserLikedContent;
use crate::database::repositories::{ContentRepository, LikeRepository};
use crate::error::ApiError;
use crate::services::on_unique_violation;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_content(
        &self,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<UserLikedContent>), ApiError> {
        let total = LikeRepository::count_for_content(&self.pool, content_id).await?;
        let items = LikeRepository::list_for_content(&self.pool, content_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn like(&self, user_id: Uuid, content_id: Uuid) -> Result<UserLikedContent, ApiError> {
        if ContentRepository::get_ref(&self.pool, content_id).await?.is_none() {
            return Err(ApiError::not_found("Content not found"));
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = LikeRepository::insert(&mut tx, user_id, content_id)
            .await
            .map_err(|e| on_unique_violation(e, "Content is already liked by this user"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn unlike(&self, user_id: Uuid, content_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = LikeRepository::delete(&mut tx, user_id, content_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Like not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
