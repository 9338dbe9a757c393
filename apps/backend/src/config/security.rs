use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::env::{flag_var, must_var, parse_var, var_or};
use crate::error::AppError;
use crate::state::security_config::{
    SecurityConfig, DEFAULT_CLIENT_ID, DEFAULT_ISSUER, DEFAULT_TOKEN_TTL_MINUTES,
};

/// Build the token/guard configuration from the environment:
///
/// - `OIDC_ISSUER`, `OIDC_CLIENT_ID`: identity pins (development defaults)
/// - `SECRET_KEY`: required shared secret
/// - `ALGORITHM`: HS256 (default), HS384 or HS512
/// - `ACCESS_TOKEN_EXPIRE_MINUTES`: positive integer, default 30
/// - `OIDC_JWKS_FETCH`: enable background key-set fetch, default off
pub fn security_from_env() -> Result<SecurityConfig, AppError> {
    let secret = must_var("SECRET_KEY")?;
    let algorithm = parse_algorithm(&var_or("ALGORITHM", "HS256"))?;

    let ttl_minutes: u64 = parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
    if ttl_minutes == 0 {
        return Err(AppError::config(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be greater than zero",
        ));
    }

    Ok(SecurityConfig::new(secret.into_bytes())
        .with_issuer(var_or("OIDC_ISSUER", DEFAULT_ISSUER))
        .with_client_id(var_or("OIDC_CLIENT_ID", DEFAULT_CLIENT_ID))
        .with_algorithm(algorithm)
        .with_token_ttl(Duration::from_secs(ttl_minutes * 60))
        .with_key_set_fetch(flag_var("OIDC_JWKS_FETCH", false)?))
}

/// Only the HMAC family is usable with a shared secret.
fn parse_algorithm(raw: &str) -> Result<Algorithm, AppError> {
    let algorithm = Algorithm::from_str(raw.trim())
        .map_err(|_| AppError::config(format!("Unsupported signing algorithm '{raw}'")))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(AppError::config(format!(
            "Signing algorithm '{raw}' requires asymmetric keys; use HS256, HS384 or HS512"
        ))),
    }
}
