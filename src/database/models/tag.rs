use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// Many-to-many link between tags and content rows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentTag {
    pub content_id: Uuid,
    pub tag_id: Uuid,
}
