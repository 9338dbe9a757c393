use actix_web::{web, HttpResponse};
use serde_json::json;

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Savannah Orders API v1.0.0" }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
