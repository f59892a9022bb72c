use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::ContentType;
use crate::error::ApiError;
use crate::schemas::{check_len, check_opt_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 120;
pub const DESC_MAX: usize = 2000;

/// Shared fields for creating any content subtype. `author_id` may be
/// omitted; the authenticated user is used. `content_type`, when present,
/// must match the endpoint's kind.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub like_count: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub content_type: Option<ContentType>,
}

impl ContentCreate {
    pub fn collect_errors(&self, errors: &mut FieldErrors) {
        check_len(errors, "name", &self.name, NAME_MIN, NAME_MAX);
        check_opt_len(errors, "description", self.description.as_deref(), DESC_MAX);
        if self.like_count < 0 {
            errors.insert("like_count".to_string(), "must be >= 0".to_string());
        }
    }

    pub fn validate(&self, expected: ContentType) -> Result<(), ApiError> {
        if let Some(kind) = self.content_type {
            if kind != expected {
                return Err(ApiError::bad_request(format!(
                    "content_type must be '{}'",
                    expected.as_str()
                )));
            }
        }
        let mut errors = FieldErrors::new();
        self.collect_errors(&mut errors);
        into_result(errors)
    }
}

/// Shared PATCH fields for any content subtype; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub like_count: Option<i32>,
}

impl ContentPatch {
    pub fn collect_errors(&self, errors: &mut FieldErrors) {
        if let Some(name) = &self.name {
            check_len(errors, "name", name, NAME_MIN, NAME_MAX);
        }
        if let Some(Some(description)) = &self.description {
            check_opt_len(errors, "description", Some(description.as_str()), DESC_MAX);
        }
        if let Some(like_count) = self.like_count {
            if like_count < 0 {
                errors.insert("like_count".to_string(), "must be >= 0".to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        self.collect_errors(&mut errors);
        into_result(errors)
    }

    /// Fold the patch into base fields loaded from an existing row
    pub fn apply(
        &self,
        name: &mut String,
        description: &mut Option<String>,
        public: &mut bool,
        like_count: &mut i32,
    ) {
        if let Some(new_name) = &self.name {
            *name = new_name.trim().to_string();
        }
        if let Some(new_description) = &self.description {
            *description = new_description.as_ref().map(|d| d.trim().to_string());
        }
        if let Some(new_public) = self.public {
            *public = new_public;
        }
        if let Some(new_like_count) = self.like_count {
            *like_count = new_like_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, like_count: i32) -> ContentCreate {
        ContentCreate {
            name: name.to_string(),
            description: None,
            public: false,
            like_count,
            created_at: None,
            author_id: None,
            content_type: None,
        }
    }

    #[test]
    fn rejects_negative_like_count() {
        let err = create("Campout", -1).validate(ContentType::Program).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn rejects_empty_name() {
        assert!(create("", 0).validate(ContentType::Program).is_err());
        assert!(create("  ", 0).validate(ContentType::Program).is_err());
    }

    #[test]
    fn rejects_mismatched_content_type() {
        let mut body = create("Campout", 0);
        body.content_type = Some(ContentType::Task);
        assert!(body.validate(ContentType::Event).is_err());
        body.content_type = Some(ContentType::Event);
        assert!(body.validate(ContentType::Event).is_ok());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let absent: ContentPatch = serde_json::from_str("{}").unwrap();
        assert!(absent.description.is_none());

        let null: ContentPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: ContentPatch = serde_json::from_str(r#"{"description": "hi"}"#).unwrap();
        assert_eq!(set.description, Some(Some("hi".to_string())));
    }

    #[test]
    fn patch_rejects_negative_like_count() {
        let patch: ContentPatch = serde_json::from_str(r#"{"like_count": -5}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let patch: ContentPatch =
            serde_json::from_str(r#"{"name": " Hike ", "like_count": 3}"#).unwrap();
        let mut name = "Old".to_string();
        let mut description = Some("keep".to_string());
        let mut public = true;
        let mut like_count = 0;
        patch.apply(&mut name, &mut description, &mut public, &mut like_count);
        assert_eq!(name, "Hike");
        assert_eq!(description.as_deref(), Some("keep"));
        assert!(public);
        assert_eq!(like_count, 3);
    }
}
