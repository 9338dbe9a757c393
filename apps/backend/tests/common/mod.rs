#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use orders_backend::infra::state::build_state;
use orders_backend::middleware::request_trace::RequestTrace;
use orders_backend::routes;
use orders_backend::services::notifications::RecordingNotifier;
use orders_backend::state::app_state::AppState;
use orders_backend::SecurityConfig;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &[u8] = b"integration_test_secret_key_0123456789";

pub fn security_config() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.to_vec())
}

/// A running test service plus the pieces tests inspect afterwards.
pub struct TestApp<S> {
    pub service: S,
    pub state: web::Data<AppState>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build the full route surface over a fresh in-memory SQLite database.
pub async fn spawn_app() -> TestApp<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>>
{
    spawn_app_with(security_config()).await
}

pub async fn spawn_app_with(
    security: SecurityConfig,
) -> TestApp<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>> {
    let notifier = Arc::new(RecordingNotifier::new());
    let state = build_state()
        .with_db("sqlite::memory:")
        .with_security(security)
        .with_notifier(notifier.clone())
        .build()
        .await
        .expect("build test state");
    let state = web::Data::new(state);

    let service = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(state.clone())
            .configure(routes::configure),
    )
    .await;

    TestApp {
        service,
        state,
        notifier,
    }
}

/// `Bearer` header value for a token minted by the app's own token service.
pub fn bearer(state: &AppState, scopes: &[&str]) -> String {
    let issued = state
        .tokens()
        .issue("test-user", scopes.iter().copied())
        .expect("issue test token");
    format!("Bearer {}", issued.access_token)
}

pub fn customer_body(code: &str) -> Value {
    json!({
        "name": "Jane Wanjiru",
        "code": code,
        "phone_number": "0712345678",
        "email": "jane@example.test",
    })
}

pub fn order_body(customer_id: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "item": "Maize flour",
        "amount": 250.0,
        "time": "2025-10-19T08:30:00Z",
        "description": "Two bags",
    })
}

/// POST a customer and return its id.
pub async fn create_customer<S>(app: &S, auth: &str, code: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth))
        .set_json(customer_body(code))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_str().expect("customer id").to_string()
}

/// POST an order and return its id.
pub async fn create_order<S>(app: &S, auth: &str, customer_id: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/orders")
        .insert_header(("Authorization", auth))
        .set_json(order_body(customer_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_str().expect("order id").to_string()
}
