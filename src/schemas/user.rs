use serde::Deserialize;

use crate::error::ApiError;
use crate::schemas::{check_email, check_len, check_opt_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 120;
pub const EMAIL_MAX: usize = 254;
pub const AUTH0_ID_MAX: usize = 120;
pub const PRONOUNS_MAX: usize = 40;

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub auth0_id: String,
    #[serde(default)]
    pub pronouns: Option<String>,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        check_email(&mut errors, "email", &self.email);
        check_opt_len(&mut errors, "email", Some(self.email.as_str()), EMAIL_MAX);
        check_len(&mut errors, "auth0_id", &self.auth0_id, 1, AUTH0_ID_MAX);
        check_opt_len(&mut errors, "pronouns", self.pronouns.as_deref(), PRONOUNS_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub auth0_id: Option<String>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub pronouns: Option<Option<String>>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_len(&mut errors, "name", name, NAME_MIN, NAME_MAX);
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, "email", email);
            check_opt_len(&mut errors, "email", Some(email.as_str()), EMAIL_MAX);
        }
        if let Some(auth0_id) = &self.auth0_id {
            check_len(&mut errors, "auth0_id", auth0_id, 1, AUTH0_ID_MAX);
        }
        if let Some(Some(pronouns)) = &self.pronouns {
            check_opt_len(&mut errors, "pronouns", Some(pronouns.as_str()), PRONOUNS_MAX);
        }
        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_valid_email() {
        let body = UserCreate {
            name: "Robin".to_string(),
            email: "not-an-email".to_string(),
            auth0_id: "auth0|abc".to_string(),
            pronouns: None,
        };
        let err = body.validate().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn patch_accepts_partial_bodies() {
        let patch: UserPatch = serde_json::from_str(r#"{"name": "Robin"}"#).unwrap();
        assert!(patch.validate().is_ok());
        assert!(patch.email.is_none());
    }
}
