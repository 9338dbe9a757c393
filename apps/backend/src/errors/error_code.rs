//! Error codes for the orders API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

/// Centralized, closed set of machine-readable rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Token verification (401)
    /// Signature mismatch or malformed token encoding
    InvalidSignature,
    /// `exp` has passed
    TokenExpired,
    /// `nbf` is in the future
    TokenNotYetValid,
    /// One or more required claims absent
    MissingClaims,
    /// `iss` does not match the configured issuer
    IssuerMismatch,
    /// `aud` does not contain the configured client id
    AudienceMismatch,

    // Guard (403)
    /// No usable bearer credential on the request
    MissingCredential,
    /// Principal lacks the required scope
    InsufficientScope,

    // Request validation
    /// Malformed body or query
    BadRequest,
    /// Field-level validation failure
    ValidationError,
    /// Token issuance refused for an empty subject
    InvalidSubject,
    /// Request body over the size limit
    PayloadTooLarge,

    // Collaborator outcomes
    /// Customer code already taken
    DuplicateCode,
    /// Customer does not exist
    CustomerNotFound,
    /// Order does not exist
    OrderNotFound,
    /// Generic not found
    NotFound,
    /// Generic conflict (fallback for unmatched constraint violations)
    Conflict,

    // System errors
    /// Database error
    DbError,
    /// Database not configured or unreachable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code, exactly as it appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            Self::MissingClaims => "MISSING_CLAIMS",
            Self::IssuerMismatch => "ISSUER_MISMATCH",
            Self::AudienceMismatch => "AUDIENCE_MISMATCH",

            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InsufficientScope => "INSUFFICIENT_SCOPE",

            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidSubject => "INVALID_SUBJECT",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::DuplicateCode => "DUPLICATE_CODE",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
