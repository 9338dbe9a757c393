use actix_cors::Cors;
use actix_web::http::header;

use crate::config::env::opt_var;

/// CORS policy from `CORS_ALLOWED_ORIGINS` (comma-separated).
///
/// `*` allows any origin. Unset or empty falls back to local development
/// origins only.
pub fn cors_middleware() -> Cors {
    let raw = opt_var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    build_cors(&parse_origins(&raw))
}

/// Parsed origin policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

pub fn parse_origins(raw: &str) -> AllowedOrigins {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .collect();

    if entries.contains(&"*") {
        return AllowedOrigins::Any;
    }

    let origins: Vec<String> = entries
        .into_iter()
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        AllowedOrigins::List(vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ])
    } else {
        AllowedOrigins::List(origins)
    }
}

fn build_cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_allows_any() {
        assert_eq!(parse_origins("*"), AllowedOrigins::Any);
        assert_eq!(parse_origins("https://a.test, *"), AllowedOrigins::Any);
    }

    #[test]
    fn explicit_list_is_filtered() {
        assert_eq!(
            parse_origins("https://a.test, null, ftp://b.test,,http://c.test"),
            AllowedOrigins::List(vec!["https://a.test".into(), "http://c.test".into()])
        );
    }

    #[test]
    fn empty_falls_back_to_localhost() {
        match parse_origins("") {
            AllowedOrigins::List(list) => assert!(list.iter().all(|o| o.contains("3000"))),
            other => panic!("unexpected {other:?}"),
        }
    }
}
