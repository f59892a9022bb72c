use serde::Deserialize;

use crate::error::ApiError;
use crate::schemas::{check_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct TagCreate {
    pub name: String,
}

impl TagCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        into_result(errors)
    }
}

/// Tags only carry a name, so a rename is the whole patch
#[derive(Debug, Clone, Deserialize)]
pub struct TagPatch {
    pub name: String,
}

impl TagPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        into_result(errors)
    }
}
