//! OpenID Connect shaped claims carried by access tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// `aud` may be a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, client_id: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == client_id,
            Audience::Many(auds) => auds.iter().any(|aud| aud == client_id),
        }
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Audience::Single(value.to_string())
    }
}

/// Fully validated claim set. Only produced by issuance or by a successful
/// decode, so every required field is present. `nbf` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Opaque user identifier
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Not-before (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Application scopes; order is irrelevant
    #[serde(default)]
    pub scopes: BTreeSet<String>,
    /// Informational display name, mirrors `sub`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// What actually arrived on the wire. Every field is optional so that absence
/// is reported as a claim error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawClaims {
    pub sub: Option<String>,
    pub iss: Option<String>,
    pub aud: Option<Audience>,
    #[serde(default, deserialize_with = "numeric_date")]
    pub iat: Option<i64>,
    #[serde(default, deserialize_with = "numeric_date")]
    pub nbf: Option<i64>,
    #[serde(default, deserialize_with = "numeric_date")]
    pub exp: Option<i64>,
    pub scopes: Option<BTreeSet<String>>,
    pub username: Option<String>,
}

/// NumericDate may carry a fractional part; whole seconds are kept.
fn numeric_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.map(|secs| secs.trunc() as i64))
}

impl RawClaims {
    /// Names of required claims that are absent. `aud` is checked separately
    /// because an absent audience is an audience mismatch.
    pub(crate) fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.sub.as_deref().map_or(true, str::is_empty) {
            missing.push("sub");
        }
        if self.iss.is_none() {
            missing.push("iss");
        }
        if self.exp.is_none() {
            missing.push("exp");
        }
        if self.iat.is_none() {
            missing.push("iat");
        }
        missing
    }
}

/// The verified identity attached to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub scopes: BTreeSet<String>,
}

impl Principal {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_accepts_string_or_array() {
        let single: Audience = serde_json::from_str(r#""client-a""#).unwrap();
        assert!(single.contains("client-a"));
        assert!(!single.contains("client-b"));

        let many: Audience = serde_json::from_str(r#"["client-b", "client-a"]"#).unwrap();
        assert!(many.contains("client-a"));
        assert!(!many.contains("client-c"));
    }

    #[test]
    fn missing_required_lists_absent_claims() {
        let raw: RawClaims = serde_json::from_str(r#"{"iss": "x", "aud": "y"}"#).unwrap();
        assert_eq!(raw.missing_required(), vec!["sub", "exp", "iat"]);
    }

    #[test]
    fn fractional_numeric_dates_are_truncated() {
        let raw: RawClaims = serde_json::from_str(
            r#"{"sub": "a", "iss": "x", "iat": 1700000000.75, "nbf": 1700000000, "exp": 1700000600.5}"#,
        )
        .unwrap();
        assert_eq!(raw.iat, Some(1_700_000_000));
        assert_eq!(raw.nbf, Some(1_700_000_000));
        assert_eq!(raw.exp, Some(1_700_000_600));
    }

    #[test]
    fn null_numeric_date_counts_as_missing() {
        let raw: RawClaims =
            serde_json::from_str(r#"{"sub": "a", "iss": "x", "iat": 0, "exp": null}"#).unwrap();
        assert_eq!(raw.missing_required(), vec!["exp"]);
    }

    #[test]
    fn scopes_default_to_empty() {
        let raw: RawClaims =
            serde_json::from_str(r#"{"sub": "a", "iss": "x", "exp": 1, "iat": 0}"#).unwrap();
        assert!(raw.scopes.is_none());
        assert!(raw.missing_required().is_empty());
    }
}
