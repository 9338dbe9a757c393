//! Field checks shared by request bodies.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;
use crate::errors::ErrorCode;

fn invalid(detail: String) -> AppError {
    AppError::invalid(ErrorCode::ValidationError, detail)
}

/// Non-blank and at most `max` characters.
pub fn text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be blank")));
    }
    if value.chars().count() > max {
        return Err(invalid(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), AppError> {
    static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
    });

    if value.chars().count() > 255 || !EMAIL.is_match(value) {
        return Err(invalid("email must be a valid email address".to_string()));
    }
    Ok(())
}

pub fn amount(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("amount must be a non-negative number".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rules() {
        assert!(text("name", "Jane", 10).is_ok());
        assert!(text("name", "   ", 10).is_err());
        assert!(text("code", "ABCDEFGHIJK", 10).is_err());
    }

    #[test]
    fn email_rules() {
        assert!(email("jane@example.com").is_ok());
        assert!(email("j.doe+orders@mail.example.co.ke").is_ok());
        assert!(email("not-an-email").is_err());
        assert!(email("jane@localhost").is_err());
        assert!(email("jane @example.com").is_err());
    }

    #[test]
    fn amount_rules() {
        assert!(amount(0.0).is_ok());
        assert!(amount(1500.5).is_ok());
        assert!(amount(-1.0).is_err());
        assert!(amount(f64::NAN).is_err());
        assert!(amount(f64::INFINITY).is_err());
    }
}
