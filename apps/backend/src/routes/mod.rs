use actix_web::web;
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::Page;

pub mod customers;
pub mod health;
pub mod oauth;
pub mod orders;
pub mod validation;

/// `?skip=&limit=` for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

/// Register every route. Shared by `main` and the integration tests so both
/// serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path: {err}")).into()
    }));

    cfg.configure(health::configure_routes)
        .configure(oauth::configure_routes)
        .service(web::scope("/api/v1/customers").configure(customers::configure_routes))
        .service(web::scope("/api/v1/orders").configure(orders::configure_routes));
}
