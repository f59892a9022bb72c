use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Discriminator for the polymorphic content family. Each variant has a
/// child table sharing the `content` primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Program,
    Event,
    Task,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Program => "program",
            ContentType::Event => "event",
            ContentType::Task => "task",
        }
    }
}

/// Minimal view of a base content row, used when an operation only needs to
/// know that the target exists (comments, tags, likes).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentRef {
    pub id: Uuid,
    pub content_type: ContentType,
}
