// Unit tests for error mapping: pure conversions, no HTTP server or database.
use actix_web::body::to_bytes;
use actix_web::ResponseError;

use crate::auth::guard::AuthError;
use crate::auth::token_service::TokenError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_duplicate_code_to_400() {
    let app: AppError = DomainError::duplicate_code().into();
    assert_eq!(app.code(), ErrorCode::DuplicateCode);
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found_kinds() {
    let app: AppError = DomainError::customer_not_found().into();
    assert_eq!(app.code(), ErrorCode::CustomerNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::order_not_found().into();
    assert_eq!(app.code(), ErrorCode::OrderNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Other("Row".into()), "nope").into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::DbTimeout);
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("?".into()), "boom").into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn token_failures_are_unauthorized() {
    let cases = [
        (TokenError::InvalidSignature, ErrorCode::InvalidSignature),
        (TokenError::Expired, ErrorCode::TokenExpired),
        (TokenError::NotYetValid, ErrorCode::TokenNotYetValid),
        (TokenError::MissingClaims(vec!["sub"]), ErrorCode::MissingClaims),
        (TokenError::IssuerMismatch, ErrorCode::IssuerMismatch),
        (TokenError::AudienceMismatch, ErrorCode::AudienceMismatch),
    ];
    for (err, code) in cases {
        let app: AppError = AuthError::Token(err).into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 401);
    }
}

#[test]
fn guard_failures_are_forbidden() {
    let app: AppError = AuthError::MissingCredential.into();
    assert_eq!(app.code(), ErrorCode::MissingCredential);
    assert_eq!(app.status().as_u16(), 403);

    let app: AppError = AuthError::InsufficientScope {
        required: "write".into(),
    }
    .into();
    assert_eq!(app.code(), ErrorCode::InsufficientScope);
    assert_eq!(app.status().as_u16(), 403);
}

#[actix_web::test]
async fn internal_detail_is_not_leaked() {
    let err = AppError::internal("secret=hunter2 exploded");
    let resp = err.error_response();
    assert_eq!(resp.status().as_u16(), 500);

    let body = to_bytes(resp.into_body()).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!text.contains("hunter2"));
    assert!(text.contains("\"code\":\"INTERNAL\""));
}

#[actix_web::test]
async fn unauthorized_carries_www_authenticate() {
    let err: AppError = TokenError::Expired.into();
    let resp = err.error_response();
    assert_eq!(
        resp.headers()
            .get(actix_web::http::header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[test]
fn humanizes_codes() {
    assert_eq!(AppError::humanize_code("INSUFFICIENT_SCOPE"), "Insufficient Scope");
    assert_eq!(AppError::humanize_code("DUPLICATE_CODE"), "Duplicate Code");
}
