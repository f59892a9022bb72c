use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::ContentType;
use crate::error::ApiError;
use crate::schemas::content::{ContentCreate, ContentPatch};
use crate::schemas::{check_opt_len, into_result, FieldErrors};

pub const IMG_MAX: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramCreate {
    #[serde(flatten)]
    pub content: ContentCreate,
    #[serde(default)]
    pub image: Option<String>,
    /// Optional echo of the path workspace; mismatches are rejected
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
}

impl ProgramCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.content.validate(ContentType::Program)?;
        let mut errors = FieldErrors::new();
        check_opt_len(&mut errors, "image", self.image.as_deref(), IMG_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramPatch {
    #[serde(flatten)]
    pub content: ContentPatch,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
}

impl ProgramPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        self.content.collect_errors(&mut errors);
        if let Some(Some(image)) = &self.image {
            check_opt_len(&mut errors, "image", Some(image.as_str()), IMG_MAX);
        }
        into_result(errors)
    }
}
