//! Request authorization guard.
//!
//! A request moves from unauthenticated to authenticated once a bearer
//! credential verifies, and to authorized once the required scope is present.
//! Any failure is terminal for that request.

use std::time::SystemTime;

use thiserror::Error;

use super::claims::Principal;
use super::token_service::{TokenError, TokenService};

/// Scope that satisfies every scope requirement.
pub const ADMIN_SCOPE: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No bearer credential supplied")]
    MissingCredential,
    #[error("Scope '{required}' is required")]
    InsufficientScope { required: String },
    #[error(transparent)]
    Token(#[from] TokenError),
}

#[derive(Clone)]
pub struct AuthGuard {
    tokens: TokenService,
}

impl AuthGuard {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Resolve the `Authorization` header value into a principal.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        self.authenticate_at(authorization, SystemTime::now())
    }

    pub fn authenticate_at(
        &self,
        authorization: Option<&str>,
        now: SystemTime,
    ) -> Result<Principal, AuthError> {
        let token = bearer_credential(authorization).ok_or(AuthError::MissingCredential)?;
        Ok(self.tokens.verify_at(token, now)?)
    }

    /// Pass the principal through when it carries `required` or the admin scope.
    pub fn authorize(principal: Principal, required: &str) -> Result<Principal, AuthError> {
        if principal.has_scope(required) || principal.has_scope(ADMIN_SCOPE) {
            Ok(principal)
        } else {
            Err(AuthError::InsufficientScope {
                required: required.to_string(),
            })
        }
    }
}

/// Extract the credential from a `Bearer <token>` header value.
///
/// The scheme is case-insensitive; anything other than exactly one
/// non-empty credential after it yields `None`.
pub fn bearer_credential(authorization: Option<&str>) -> Option<&str> {
    let mut parts = authorization?.split_whitespace();
    let scheme = parts.next()?;
    let credential = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }
    Some(credential)
}
