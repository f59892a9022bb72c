use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::repositories::UserRepository;
use crate::error::ApiError;
use crate::schemas::user::{UserCreate, UserPatch};
use crate::services::on_unique_violation;

const DUPLICATE: &str = "User with this email or auth0_id already exists";

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, ApiError> {
        UserRepository::get(&self.pool, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub async fn list(
        &self,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(i64, Vec<User>), ApiError> {
        let total = UserRepository::count(&self.pool, q).await?;
        let items = UserRepository::list(&self.pool, q, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn create(&self, data: UserCreate) -> Result<User, ApiError> {
        data.validate()?;
        let user = User {
            id: Uuid::new_v4(),
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            auth0_id: data.auth0_id.trim().to_string(),
            pronouns: data.pronouns.map(|p| p.trim().to_string()),
        };

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = UserRepository::insert(&mut tx, &user)
            .await
            .map_err(|e| on_unique_violation(e, DUPLICATE))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn update(&self, user_id: Uuid, data: UserPatch) -> Result<User, ApiError> {
        data.validate()?;
        let mut user = self.get(user_id).await?;

        if let Some(name) = &data.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = &data.email {
            user.email = email.trim().to_string();
        }
        if let Some(auth0_id) = &data.auth0_id {
            user.auth0_id = auth0_id.trim().to_string();
        }
        if let Some(pronouns) = &data.pronouns {
            user.pronouns = pronouns.as_ref().map(|p| p.trim().to_string());
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = UserRepository::update(&mut tx, &user)
            .await
            .map_err(|e| on_unique_violation(e, DUPLICATE))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<(), ApiError> {
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = UserRepository::delete(&mut tx, user_id).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
