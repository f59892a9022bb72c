use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ContentTag, Tag};

pub struct TagRepository;

impl TagRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Tag>, DatabaseError> {
        let row = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn get_by_name(
        db: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Tag>, DatabaseError> {
        let row = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn list(
        db: impl PgExecutor<'_>,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Tag>, DatabaseError> {
        let pattern = q.map(|q| format!("%{}%", q.trim()));
        let rows = sqlx::query_as::<_, Tag>(
            "SELECT id, name FROM tags \
             WHERE $1::text IS NULL OR name ILIKE $1 \
             ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count(db: impl PgExecutor<'_>, q: Option<&str>) -> Result<i64, DatabaseError> {
        let pattern = q.map(|q| format!("%{}%", q.trim()));
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tags WHERE $1::text IS NULL OR name ILIKE $1",
        )
        .bind(pattern)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn insert(db: &mut PgConnection, tag: &Tag) -> Result<Tag, DatabaseError> {
        let row = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &mut PgConnection, tag: &Tag) -> Result<Tag, DatabaseError> {
        let row = sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    // ----- content associations -----

    pub async fn insert_link(
        db: &mut PgConnection,
        content_id: Uuid,
        tag_id: Uuid,
    ) -> Result<ContentTag, DatabaseError> {
        let row = sqlx::query_as::<_, ContentTag>(
            "INSERT INTO content_tags (content_id, tag_id) VALUES ($1, $2) \
             RETURNING content_id, tag_id",
        )
        .bind(content_id)
        .bind(tag_id)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_link(
        db: &mut PgConnection,
        content_id: Uuid,
        tag_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result =
            sqlx::query("DELETE FROM content_tags WHERE content_id = $1 AND tag_id = $2")
                .bind(content_id)
                .bind(tag_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }

    /// Tags attached to a content row, ordered by name
    pub async fn list_for_content(
        db: impl PgExecutor<'_>,
        content_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Tag>, DatabaseError> {
        let rows = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name FROM tags t \
             JOIN content_tags ct ON ct.tag_id = t.id \
             WHERE ct.content_id = $1 ORDER BY t.name ASC LIMIT $2 OFFSET $3",
        )
        .bind(content_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_for_content(
        db: impl PgExecutor<'_>,
        content_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM content_tags WHERE content_id = $1")
                .bind(content_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    /// Ids of content rows carrying a tag
    pub async fn list_content_for_tag(
        db: impl PgExecutor<'_>,
        tag_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Uuid>, DatabaseError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT content_id FROM content_tags WHERE tag_id = $1 \
             ORDER BY content_id ASC LIMIT $2 OFFSET $3",
        )
        .bind(tag_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(ids)
    }

    pub async fn count_content_for_tag(
        db: impl PgExecutor<'_>,
        tag_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM content_tags WHERE tag_id = $1")
                .bind(tag_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }
}
