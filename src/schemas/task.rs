use serde::Deserialize;

use crate::database::models::ContentType;
use crate::error::ApiError;
use crate::schemas::content::{ContentCreate, ContentPatch};

#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreate {
    #[serde(flatten)]
    pub content: ContentCreate,
}

impl TaskCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.content.validate(ContentType::Task)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(flatten)]
    pub content: ContentPatch,
}

impl TaskPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.content.validate()
    }
}
