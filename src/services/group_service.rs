use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Group, GroupMembership};
use crate::database::repositories::GroupRepository;
use crate::error::ApiError;
use crate::schemas::group::{GroupCreate, GroupPatch};
use crate::schemas::membership::{MembershipCreate, MembershipPatch};
use crate::services::on_unique_violation;

pub struct GroupService {
    pool: PgPool,
}

impl GroupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, group_id: Uuid) -> Result<Group, ApiError> {
        GroupRepository::get(&self.pool, group_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Group not found"))
    }

    pub async fn list(
        &self,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<Group>), ApiError> {
        let total = GroupRepository::count(&self.pool, q).await?;
        let items = GroupRepository::list(&self.pool, q, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create(&self, data: GroupCreate) -> Result<Group, ApiError> {
        data.validate()?;
        let group = Group {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            image: data.image.map(|i| i.trim().to_string()),
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = GroupRepository::insert(&mut tx, &group).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(&self, group_id: Uuid, data: GroupPatch) -> Result<Group, ApiError> {
        data.validate()?;
        let mut group = self.get(group_id).await?;

        if let Some(name) = &data.name {
            group.name = name.trim().to_string();
        }
        if let Some(image) = &data.image {
            group.image = image.as_ref().map(|i| i.trim().to_string());
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = GroupRepository::update(&mut tx, &group).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn delete(&self, group_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = GroupRepository::delete(&mut tx, group_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Group not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }

    // ----- memberships -----

    pub async fn list_members(
        &self,
        group_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<GroupMembership>), ApiError> {
        // ensure the group exists so an empty page isn't ambiguous
        self.get(group_id).await?;
        let total = GroupRepository::count_memberships(&self.pool, group_id).await?;
        let items = GroupRepository::list_memberships(&self.pool, group_id, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        data: MembershipCreate,
    ) -> Result<GroupMembership, ApiError> {
        if let Some(body_group) = data.group_id {
            if body_group != group_id {
                return Err(ApiError::bad_request(
                    "group_id in body does not match path parameter",
                ));
            }
        }
        self.get(group_id).await?;

        let membership = GroupMembership { group_id, user_id: data.user_id, role: data.role };
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = GroupRepository::insert_membership(&mut tx, &membership)
            .await
            .map_err(|e| on_unique_violation(e, "User is already a member of this group"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        data: MembershipPatch,
    ) -> Result<GroupMembership, ApiError> {
        let mut membership = GroupRepository::get_membership(&self.pool, group_id, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Membership not found"))?;

        if let Some(role) = data.role {
            membership.role = role;
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = GroupRepository::update_membership(&mut tx, &membership).await?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = GroupRepository::delete_membership(&mut tx, group_id, user_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Membership not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
