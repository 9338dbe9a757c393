mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use backend_test_support::problem_details::assert_problem_details_from_parts;
use common::spawn_app;
use orders_backend::errors::ErrorCode;
use orders_backend::{AppError, RequestTrace};

async fn failing_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid(
        ErrorCode::ValidationError,
        "Example failure",
    ))
}

async fn leaking_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::Internal {
        detail: "connection string postgres://secret@db".to_string(),
    })
}

#[actix_web::test]
async fn error_body_carries_request_trace_id() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(failing_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "VALIDATION_ERROR",
        StatusCode::UNPROCESSABLE_ENTITY,
    );
    assert_eq!(problem.detail, "Example failure");
    assert_eq!(
        headers.get("x-request-id").and_then(|v| v.to_str().ok()),
        Some(problem.trace_id.as_str())
    );
}

#[actix_web::test]
async fn internal_errors_hide_their_cause() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/internal", web::get().to(leaking_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/internal").to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INTERNAL",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    assert!(!problem.detail.contains("secret"));
}

#[actix_web::test]
async fn every_request_gets_a_distinct_request_id() {
    let app = spawn_app().await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app.service, req).await;
        let id = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();
        assert_eq!(id.len(), 36);
        seen.push(id);
    }
    assert_ne!(seen[0], seen[1]);
}
