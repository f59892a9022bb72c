//! Request body types and their field validation.
//!
//! Create/patch inputs are plain serde structs; each carries an explicit
//! `validate()` that collects per-field problems into the error map the
//! API surfaces as a 400 `VALIDATION_ERROR`.

pub mod comment;
pub mod content;
pub mod email_list;
pub mod event;
pub mod group;
pub mod membership;
pub mod program;
pub mod tag;
pub mod task;
pub mod troop;
pub mod user;
pub mod workspace;

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

pub type FieldErrors = HashMap<String, String>;

/// Deserializer for PATCH fields that must distinguish "absent" from
/// "explicit null": absent stays `None`, null becomes `Some(None)`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

pub(crate) fn check_len(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len < min {
        errors.insert(field.to_string(), format!("must be at least {} characters", min));
    } else if len > max {
        errors.insert(field.to_string(), format!("must be at most {} characters", max));
    }
}

pub(crate) fn check_opt_len(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(value) = value {
        if value.trim().chars().count() > max {
            errors.insert(field.to_string(), format!("must be at most {} characters", max));
        }
    }
}

/// Lenient shape check; real deliverability is the mail provider's problem
pub(crate) fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        errors.insert(field.to_string(), "must be a valid email address".to_string());
    }
}

pub(crate) fn into_result(errors: FieldErrors) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid input", Some(errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_check_trims_before_counting() {
        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", "   ", 1, 10);
        assert!(errors.contains_key("name"));

        let mut errors = FieldErrors::new();
        check_len(&mut errors, "name", "  ok  ", 1, 10);
        assert!(errors.is_empty());
    }

    #[test]
    fn email_shape_check() {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", "scout@example.org");
        assert!(errors.is_empty());

        for bad in ["", "no-at-sign", "@example.org", "a@nodot", "a b@example.org"] {
            let mut errors = FieldErrors::new();
            check_email(&mut errors, "email", bad);
            assert!(errors.contains_key("email"), "accepted {:?}", bad);
        }
    }
}
