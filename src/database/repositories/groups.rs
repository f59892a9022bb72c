use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Group, GroupMembership};

pub struct GroupRepository;

impl GroupRepository {
    pub async fn get(db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Group>, DatabaseError> {
        let row = sqlx::query_as::<_, Group>("SELECT id, name, image FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn list(
        db: impl PgExecutor<'_>,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Group>, DatabaseError> {
        let pattern = q.map(|q| format!("%{}%", q.trim()));
        let rows = sqlx::query_as::<_, Group>(
            "SELECT id, name, image FROM groups \
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
            "SELECT COUNT(*) FROM groups WHERE $1::text IS NULL OR name ILIKE $1",
        )
        .bind(pattern)
        .fetch_one(db)
        .await?;
        Ok(count)
    }

    pub async fn insert(db: &mut PgConnection, group: &Group) -> Result<Group, DatabaseError> {
        let row = sqlx::query_as::<_, Group>(
            "INSERT INTO groups (id, name, image) VALUES ($1, $2, $3) \
             RETURNING id, name, image",
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.image)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(db: &mut PgConnection, group: &Group) -> Result<Group, DatabaseError> {
        let row = sqlx::query_as::<_, Group>(
            "UPDATE groups SET name = $2, image = $3 WHERE id = $1 \
             RETURNING id, name, image",
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.image)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &mut PgConnection, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    // ----- memberships -----

    pub async fn get_membership(
        db: impl PgExecutor<'_>,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<GroupMembership>, DatabaseError> {
        let row = sqlx::query_as::<_, GroupMembership>(
            "SELECT group_id, user_id, role FROM group_memberships \
             WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_memberships(
        db: impl PgExecutor<'_>,
        group_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GroupMembership>, DatabaseError> {
        let rows = sqlx::query_as::<_, GroupMembership>(
            "SELECT group_id, user_id, role FROM group_memberships \
             WHERE group_id = $1 ORDER BY user_id ASC LIMIT $2 OFFSET $3",
        )
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn count_memberships(
        db: impl PgExecutor<'_>,
        group_id: Uuid,
    ) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM group_memberships WHERE group_id = $1")
                .bind(group_id)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    pub async fn insert_membership(
        db: &mut PgConnection,
        membership: &GroupMembership,
    ) -> Result<GroupMembership, DatabaseError> {
        let row = sqlx::query_as::<_, GroupMembership>(
            "INSERT INTO group_memberships (group_id, user_id, role) VALUES ($1, $2, $3) \
             RETURNING group_id, user_id, role",
        )
        .bind(membership.group_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update_membership(
        db: &mut PgConnection,
        membership: &GroupMembership,
    ) -> Result<GroupMembership, DatabaseError> {
        let row = sqlx::query_as::<_, GroupMembership>(
            "UPDATE group_memberships SET role = $3 \
             WHERE group_id = $1 AND user_id = $2 \
             RETURNING group_id, user_id, role",
        )
        .bind(membership.group_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete_membership(
        db: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result =
            sqlx::query("DELETE FROM group_memberships WHERE group_id = $1 AND user_id = $2")
                .bind(group_id)
                .bind(user_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }
}
