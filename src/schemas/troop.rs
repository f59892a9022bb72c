use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::schemas::{check_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct TroopCreate {
    pub name: String,
    /// Optional echo of the path workspace; mismatches are rejected
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
}

impl TroopCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TroopPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
}

impl TroopPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_len(&mut errors, "name", name, NAME_MIN, NAME_MAX);
        }
        into_result(errors)
    }
}
