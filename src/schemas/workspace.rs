use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::models::{EventInterval, Weekday};
use crate::error::ApiError;
use crate::schemas::{check_len, into_result, FieldErrors};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 120;

fn default_weekday() -> Weekday {
    Weekday::Monday
}

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(21, 30, 0).unwrap_or(NaiveTime::MIN)
}

fn default_interval() -> EventInterval {
    EventInterval::Weekly
}

/// Season default: the first Monday of September in the current year
pub fn first_monday_of_september() -> NaiveDate {
    let year = Utc::now().date_naive().year();
    let september_first =
        NaiveDate::from_ymd_opt(year, 9, 1).unwrap_or_else(|| Utc::now().date_naive());
    let days_to_monday = (7 - september_first.weekday().num_days_from_monday()) % 7;
    september_first + chrono::Duration::days(i64::from(days_to_monday))
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceCreate {
    pub name: String,
    #[serde(default = "default_weekday")]
    pub default_meeting_weekday: Weekday,
    #[serde(default = "default_start_time")]
    pub default_start_time: NaiveTime,
    #[serde(default = "default_end_time")]
    pub default_end_time: NaiveTime,
    #[serde(default = "default_interval")]
    pub default_interval: EventInterval,
    #[serde(default)]
    pub season_start: Option<NaiveDate>,
    #[serde(default)]
    pub settings: Option<Value>,
    #[serde(default)]
    pub group_id: Option<Uuid>,
}

impl WorkspaceCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", &self.name, NAME_MIN, NAME_MAX);
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspacePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_meeting_weekday: Option<Weekday>,
    #[serde(default)]
    pub default_start_time: Option<NaiveTime>,
    #[serde(default)]
    pub default_end_time: Option<NaiveTime>,
    #[serde(default)]
    pub default_interval: Option<EventInterval>,
    #[serde(default)]
    pub season_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub settings: Option<Option<Value>>,
    #[serde(default, deserialize_with = "crate::schemas::double_option")]
    pub group_id: Option<Option<Uuid>>,
}

impl WorkspacePatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_len(&mut errors, "name", name, NAME_MIN, NAME_MAX);
        }
        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_default_is_a_monday_in_september() {
        let date = first_monday_of_september();
        assert_eq!(date.month(), 9);
        assert_eq!(date.weekday(), chrono::Weekday::Mon);
        assert!(date.day() <= 7);
    }

    #[test]
    fn create_defaults_cover_scheduling_fields() {
        let body: WorkspaceCreate = serde_json::from_str(r#"{"name": "Troop 42"}"#).unwrap();
        assert!(body.validate().is_ok());
        assert_eq!(body.default_meeting_weekday, Weekday::Monday);
        assert_eq!(body.default_start_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(body.default_end_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(body.default_interval, EventInterval::Weekly);
    }
}
