use serde::Deserialize;

use crate::error::ApiError;
use crate::schemas::{check_len, check_opt_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 120;
pub const IMG_MAX: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct GroupCreate {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl GroupCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        check_opt_len(&mut errors, "image", self.image.as_deref(), IMG_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub image: Option<Option<String>>,
}

impl GroupPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_len(&mut errors, "name", name, NAME_MIN, NAME_MAX);
        }
        if let Some(Some(image)) = &self.image {
            check_opt_len(&mut errors, "image", Some(image.as_str()), IMG_MAX);
        }
        into_result(errors)
    }
}
