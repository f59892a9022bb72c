use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::ContentType;
use crate::error::ApiError;
use crate::schemas::content::{ContentCreate, ContentPatch};
use crate::schemas::{check_opt_len, into_result, FieldErrors};

pub const LOCATION_MAX: usize = 200;

#[derive(Debug, Clone, Deserialize)]
pub struct EventCreate {
    #[serde(flatten)]
    pub content: ContentCreate,
    pub start_dt: DateTime<Utc>,
    #[serde(default)]
    pub end_dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.content.validate(ContentType::Event)?;
        let mut errors = FieldErrors::new();
        check_opt_len(&mut errors, "location", self.location.as_deref(), LOCATION_MAX);
        if let Some(end_dt) = self.end_dt {
            if end_dt < self.start_dt {
                errors.insert("end_dt".to_string(), "must not be before start_dt".to_string());
            }
        }
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    #[serde(flatten)]
    pub content: ContentPatch,
    #[serde(default)]
    pub start_dt: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub end_dt: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub location: Option<Option<String>>,
    /// Absent leaves the program link alone; explicit null detaches it
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub program_id: Option<Option<Uuid>>,
}

impl EventPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        self.content.collect_errors(&mut errors);
        if let Some(Some(location)) = &self.location {
            check_opt_len(&mut errors, "location", Some(location.as_str()), LOCATION_MAX);
        }
        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_end_before_start() {
        let body: EventCreate = serde_json::from_str(
            r#"{
                "name": "Pack meeting",
                "start_dt": "2026-09-07T20:00:00Z",
                "end_dt": "2026-09-07T19:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn patch_program_id_tristate() {
        let absent: EventPatch = serde_json::from_str("{}").unwrap();
        assert!(absent.program_id.is_none());

        let detach: EventPatch = serde_json::from_str(r#"{"program_id": null}"#).unwrap();
        assert_eq!(detach.program_id, Some(None));

        let attach: EventPatch = serde_json::from_str(
            r#"{"program_id": "7f3c8f6e-58ab-4b2f-9a3d-6a0e8f1b2c3d"}"#,
        )
        .unwrap();
        assert!(matches!(attach.program_id, Some(Some(_))));
    }
}
