use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{ContentTag, Tag};
use crate::database::repositories::{ContentRepository, TagRepository};
use crate::error::ApiError;
use crate::schemas::tag::{TagCreate, TagPatch};
use crate::services::on_unique_violation;

pub struct TagService {
    pool: PgPool,
}

impl TagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, tag_id: Uuid) -> Result<Tag, ApiError> {
        TagRepository::get(&self.pool, tag_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tag not found"))
    }

    pub async fn list(
        &self,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Tag>), ApiError> {
        let total = TagRepository::count(&self.pool, q).await?;
        let items = TagRepository::list(&self.pool, q, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create(&self, data: TagCreate) -> Result<Tag, ApiError> {
        data.validate()?;
        let name = data.name.trim().to_string();
        if TagRepository::get_by_name(&self.pool, &name).await?.is_some() {
            return Err(ApiError::conflict("Tag already exists"));
        }

        let tag = Tag { id: Uuid::new_v4(), name };
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TagRepository::insert(&mut tx, &tag)
            .await
            .map_err(|e| on_unique_violation(e, "Tag already exists"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(&self, tag_id: Uuid, data: TagPatch) -> Result<Tag, ApiError> {
        data.validate()?;
        let mut tag = self.get(tag_id).await?;
        tag.name = data.name.trim().to_string();

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TagRepository::update(&mut tx, &tag)
            .await
            .map_err(|e| on_unique_violation(e, "Tag already exists"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn delete(&self, tag_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = TagRepository::delete(&mut tx, tag_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Tag not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }

    // ----- content associations -----

    pub async fn list_tags_for_content(
        &self,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Tag>), ApiError> {
        let total = TagRepository::count_for_content(&self.pool, content_id).await?;
        let items = TagRepository::list_for_content(&self.pool, content_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn list_content_for_tag(
        &self,
        tag_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Uuid>), ApiError> {
        let total = TagRepository::count_content_for_tag(&self.pool, tag_id).await?;
        let items = TagRepository::list_content_for_tag(&self.pool, tag_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn attach(&self, content_id: Uuid, tag_id: Uuid) -> Result<ContentTag, ApiError> {
        if ContentRepository::get_ref(&self.pool, content_id).await?.is_none() {
            return Err(ApiError::not_found("Content not found"));
        }
        self.get(tag_id).await?;

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = TagRepository::insert_link(&mut tx, content_id, tag_id)
            .await
            .map_err(|e| on_unique_violation(e, "Tag is already attached to this content"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn detach(&self, content_id: Uuid, tag_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = TagRepository::delete_link(&mut tx, content_id, tag_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Tag not attached to content"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
