use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserLikedContent {
    pub user_id: Uuid,
    pub content_id: Uuid,
}
