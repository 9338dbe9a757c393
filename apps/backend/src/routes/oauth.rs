//! OpenID Connect discovery, the published key set, and the demo token
//! endpoint.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub const KEY_ID: &str = "savannah-key-1";
pub const DEMO_SUBJECT: &str = "demo-user";
pub const DEMO_SCOPES: [&str; 2] = ["read", "write"];

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub scope: String,
}

async fn openid_configuration(state: web::Data<AppState>) -> HttpResponse {
    let cfg = &state.security;
    HttpResponse::Ok().json(json!({
        "issuer": cfg.issuer,
        "authorization_endpoint": cfg.issuer_url("authorize"),
        "token_endpoint": cfg.issuer_url("oauth/token"),
        "userinfo_endpoint": cfg.issuer_url("userinfo"),
        "jwks_uri": cfg.jwks_uri(),
        "response_types_supported": ["code", "id_token", "token"],
        "subject_types_supported": ["public"],
        "id_token_signing_alg_values_supported": ["RS256", "HS256"],
        "scopes_supported": ["openid", "profile", "email", "read", "write"],
        "token_endpoint_auth_methods_supported": ["client_secret_post", "client_secret_basic"],
    }))
}

/// Key metadata only; the shared secret is never published.
async fn jwks(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "keys": [{
            "kty": "oct",
            "use": "sig",
            "kid": KEY_ID,
            "alg": state.security.algorithm_name(),
        }]
    }))
}

async fn token(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let issued = state.tokens().issue(DEMO_SUBJECT, DEMO_SCOPES)?;
    security::token_issued(DEMO_SUBJECT, &issued.scope);

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: issued.access_token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        scope: issued.scope,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/.well-known/openid_configuration",
        web::get().to(openid_configuration),
    )
    .route(
        "/.well-known/openid-configuration",
        web::get().to(openid_configuration),
    )
    .route("/.well-known/jwks.json", web::get().to(jwks))
    .route("/oauth/token", web::post().to(token));
}
