use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Get required environment variable or return a config error.
pub fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Optional variable; blank counts as unset.
pub fn opt_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn var_or(name: &str, default: &str) -> String {
    opt_var(name).unwrap_or_else(|| default.to_string())
}

/// Parse an optional variable, falling back to `default` when unset.
/// The raw value is never echoed back in the error.
pub fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match opt_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("Environment variable '{name}' is invalid"))),
    }
}

/// `true/false/1/0/yes/no`, case-insensitive.
pub fn flag_var(name: &str, default: bool) -> Result<bool, AppError> {
    match opt_var(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(AppError::config(format!(
                "Environment variable '{name}' must be a boolean"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn must_var_rejects_blank() {
        env::set_var("ORDERS_TEST_BLANK", "   ");
        assert!(must_var("ORDERS_TEST_BLANK").is_err());
        env::remove_var("ORDERS_TEST_BLANK");
        assert!(must_var("ORDERS_TEST_BLANK").is_err());
    }

    #[test]
    #[serial]
    fn parse_var_defaults_and_errors() {
        env::remove_var("ORDERS_TEST_NUM");
        assert_eq!(parse_var("ORDERS_TEST_NUM", 7u64).unwrap(), 7);

        env::set_var("ORDERS_TEST_NUM", "42");
        assert_eq!(parse_var("ORDERS_TEST_NUM", 7u64).unwrap(), 42);

        env::set_var("ORDERS_TEST_NUM", "forty-two");
        let err = parse_var("ORDERS_TEST_NUM", 7u64).unwrap_err();
        assert!(!err.to_string().contains("forty-two"));
        env::remove_var("ORDERS_TEST_NUM");
    }

    #[test]
    #[serial]
    fn flag_var_accepts_common_spellings() {
        env::set_var("ORDERS_TEST_FLAG", "YES");
        assert!(flag_var("ORDERS_TEST_FLAG", false).unwrap());
        env::set_var("ORDERS_TEST_FLAG", "0");
        assert!(!flag_var("ORDERS_TEST_FLAG", true).unwrap());
        env::set_var("ORDERS_TEST_FLAG", "maybe");
        assert!(flag_var("ORDERS_TEST_FLAG", true).is_err());
        env::remove_var("ORDERS_TEST_FLAG");
    }
}
