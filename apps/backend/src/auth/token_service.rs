//! Token issuance and verification.
//!
//! Tokens are HMAC-signed JWTs carrying OpenID Connect shaped claims plus an
//! application `scopes` list. Verification is local and symmetric; the
//! optional key-set cache is only ever refreshed in the background.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::debug;

use super::claims::{Audience, Principal, RawClaims, TokenClaims};
use super::key_set::KeySetCache;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token signature or encoding")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token is not yet valid")]
    NotYetValid,
    #[error("Token is missing required claims: {}", .0.join(", "))]
    MissingClaims(Vec<&'static str>),
    #[error("Token issuer does not match")]
    IssuerMismatch,
    #[error("Token audience does not match")]
    AudienceMismatch,
    #[error("Token subject must not be empty")]
    EmptySubject,
    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

/// Result of a successful issuance.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    /// Space-separated scope list
    pub scope: String,
    pub claims: TokenClaims,
}

#[derive(Clone)]
pub struct TokenService {
    config: Arc<SecurityConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    key_set: Option<Arc<KeySetCache>>,
}

impl TokenService {
    pub fn new(config: SecurityConfig) -> Self {
        // Signature and header algorithm are checked by the library; every
        // claim is checked by hand so each failure keeps its own reason.
        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            config: Arc::new(config),
            key_set: None,
        }
    }

    /// Attach the background key-set cache.
    pub fn with_key_set(mut self, key_set: Arc<KeySetCache>) -> Self {
        self.key_set = Some(key_set);
        self
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn key_set(&self) -> Option<&Arc<KeySetCache>> {
        self.key_set.as_ref()
    }

    pub fn issue<I, S>(&self, subject: &str, scopes: I) -> Result<IssuedToken, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issue_at(subject, scopes, SystemTime::now())
    }

    /// Mint a token valid from `now` for the configured TTL.
    pub fn issue_at<I, S>(
        &self,
        subject: &str,
        scopes: I,
        now: SystemTime,
    ) -> Result<IssuedToken, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if subject.trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let iat = unix_seconds(now);
        let ttl = self.config.token_ttl.as_secs();
        let scopes: BTreeSet<String> = scopes.into_iter().map(Into::into).collect();

        let claims = TokenClaims {
            sub: subject.to_string(),
            iss: self.config.issuer.clone(),
            aud: Audience::Single(self.config.client_id.clone()),
            iat,
            nbf: Some(iat),
            exp: iat + ttl as i64,
            scopes,
            username: Some(subject.to_string()),
        };

        let access_token = encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_in: ttl,
            scope: claims
                .scopes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            claims,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        self.verify_at(token, SystemTime::now())
    }

    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Principal, TokenError> {
        self.decode_at(token, now).map(|claims| Principal {
            subject: claims.sub,
            scopes: claims.scopes,
        })
    }

    /// Decode and fully validate a token as of `now`.
    ///
    /// Order: signature/encoding, required claims, `exp`, `nbf`, `iss`, `aud`.
    pub fn decode_at(&self, token: &str, now: SystemTime) -> Result<TokenClaims, TokenError> {
        if let Some(key_set) = &self.key_set {
            key_set.refresh_if_stale();
        }

        let raw = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "token.decode_failed");
                TokenError::InvalidSignature
            })?
            .claims;

        let missing = raw.missing_required();
        let RawClaims {
            sub: Some(sub),
            iss: Some(iss),
            aud,
            iat: Some(iat),
            nbf,
            exp: Some(exp),
            scopes,
            username,
        } = raw
        else {
            return Err(TokenError::MissingClaims(missing));
        };
        if !missing.is_empty() {
            return Err(TokenError::MissingClaims(missing));
        }

        let now = unix_seconds(now);
        if now >= exp {
            return Err(TokenError::Expired);
        }
        if nbf.is_some_and(|nbf| now < nbf) {
            return Err(TokenError::NotYetValid);
        }
        if iss != self.config.issuer {
            return Err(TokenError::IssuerMismatch);
        }
        let aud = match aud {
            Some(aud) if aud.contains(&self.config.client_id) => aud,
            _ => return Err(TokenError::AudienceMismatch),
        };

        Ok(TokenClaims {
            sub,
            iss,
            aud,
            iat,
            nbf,
            exp,
            scopes: scopes.unwrap_or_default(),
            username,
        })
    }
}

fn unix_seconds(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
