use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::schemas::{check_len, into_result, FieldErrors};

pub const BODY_MIN: usize = 1;
pub const BODY_MAX: usize = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreate {
    pub body: String,
    /// Defaults to the authenticated user
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Optional echo of the path content id; mismatches are rejected
    #[serde(default)]
    pub content_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "body", &self.body, BODY_MIN, BODY_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentPatch {
    pub body: String,
}

impl CommentPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "body", &self.body, BODY_MIN, BODY_MAX);
        into_result(errors)
    }
}
