use serde::Deserialize;

use crate::error::ApiError;
use crate::schemas::{check_email, check_opt_len, into_result, FieldErrors};

pub const EMAIL_MAX: usize = 254;

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSubscribe {
    pub email: String,
}

impl EmailSubscribe {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", &self.email);
        check_opt_len(&mut errors, "email", Some(self.email.as_str()), EMAIL_MAX);
        into_result(errors)
    }

    /// Addresses are stored trimmed and lowercased
    pub fn normalized(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let body = EmailSubscribe { email: "  Scout@Example.ORG ".to_string() };
        assert!(body.validate().is_ok());
        assert_eq!(body.normalized(), "scout@example.org");
    }
}
