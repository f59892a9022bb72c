use sqlx::PgPool;

use crate::database::models::EmailEntry;
use crate::database::repositories::EmailListRepository;
use crate::error::ApiError;
use crate::schemas::email_list::EmailSubscribe;
use crate::services::on_unique_violation;

pub struct EmailListService {
    pool: PgPool,
}

impl EmailListService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<(i64, Vec<EmailEntry>), ApiError> {
        let total = EmailListRepository::count(&self.pool).await?;
        let items = EmailListRepository::list(&self.pool, limit, offset).await?;
        Ok((total, items))
    }

    pub async fn subscribe(&self, data: EmailSubscribe) -> Result<EmailEntry, ApiError> {
        data.validate()?;
        let email = data.normalized();

        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let row = EmailListRepository::insert(&mut tx, &email)
            .await
            .map_err(|e| on_unique_violation(e, "This email is already subscribed"))?;
        tx.commit().await.map_err(ApiError::from)?;
        Ok(row)
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<(), ApiError> {
        let normalized = email.trim().to_lowercase();
        let mut tx = self.pool.begin().await.map_err(ApiError::from)?;
        let deleted = EmailListRepository::delete(&mut tx, &normalized).await?;
        if deleted == 0 {
            return Err(ApiError::not_found("Email not found in subscription list"));
        }
        tx.commit().await.map_err(ApiError::from)?;
        Ok(())
    }
}
