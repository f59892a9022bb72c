use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Subscription-list entry; the normalized address is the primary key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailEntry {
    pub email: String,
}
