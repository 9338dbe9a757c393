mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique_helpers::unique_code;
use common::{bearer, create_customer, customer_body, spawn_app};
use serde_json::{json, Value};

#[actix_web::test]
async fn create_then_fetch() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &["read"]);
    let code = unique_code("CUST");

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(customer_body(&code))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    assert_eq!(created["code"], code.as_str());
    assert_eq!(created["email"], "jane@example.test");
    assert!(created["updated_at"].is_null());
    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 36);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app.service, req).await;
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn trailing_slash_collection_path_works() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    create_customer(&app.service, &auth, &unique_code("CUST")).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/customers/")
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app.service, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn duplicate_code_is_rejected() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let code = unique_code("DUP");
    create_customer(&app.service, &auth, &code).await;

    let mut second = customer_body(&code);
    second["name"] = json!("Someone Else");
    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth.as_str()))
        .set_json(second)
        .to_request();
    let resp = test::call_service(&app.service, req).await;

    assert_problem_details(resp, "DUPLICATE_CODE", StatusCode::BAD_REQUEST).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let customers: Value = test::call_and_read_body_json(&app.service, req).await;
    let customers = customers.as_array().unwrap();
    let with_code: Vec<_> = customers
        .iter()
        .filter(|c| c["code"] == code.as_str())
        .collect();
    assert_eq!(with_code.len(), 1);
    assert_eq!(with_code[0]["name"], "Jane Wanjiru");
    assert_eq!(customers.len(), 1);
}

#[actix_web::test]
async fn invalid_email_is_unprocessable() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let mut body = customer_body(&unique_code("CUST"));
    body["email"] = json!("not-an-email");

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app.service, req).await;

    assert_problem_details(resp, "VALIDATION_ERROR", StatusCode::UNPROCESSABLE_ENTITY).await;
}

#[actix_web::test]
async fn missing_field_is_bad_request() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "name": "No Code" }))
        .to_request();
    let resp = test::call_service(&app.service, req).await;

    assert_problem_details(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn unknown_customer_is_not_found() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);

    for req in [
        test::TestRequest::get().uri("/api/v1/customers/does-not-exist"),
        test::TestRequest::delete().uri("/api/v1/customers/does-not-exist"),
        test::TestRequest::put()
            .uri("/api/v1/customers/does-not-exist")
            .set_json(json!({ "name": "Ghost" })),
    ] {
        let req = req.insert_header(("Authorization", auth.as_str())).to_request();
        let resp = test::call_service(&app.service, req).await;
        assert_problem_details(resp, "CUSTOMER_NOT_FOUND", StatusCode::NOT_FOUND).await;
    }
}

#[actix_web::test]
async fn partial_update_keeps_other_fields() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let code = unique_code("UPD");
    let id = create_customer(&app.service, &auth, &code).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/customers/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "name": "Jane W. Kamau" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app.service, req).await;

    assert_eq!(updated["name"], "Jane W. Kamau");
    assert_eq!(updated["code"], code.as_str());
    assert_eq!(updated["phone_number"], "0712345678");
    assert_eq!(updated["email"], "jane@example.test");
    assert!(updated["updated_at"].is_string());
}

#[actix_web::test]
async fn explicit_null_clears_email() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let id = create_customer(&app.service, &auth, &unique_code("NUL")).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/customers/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .set_json(json!({ "email": null }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app.service, req).await;

    assert!(updated["email"].is_null());
}

#[actix_web::test]
async fn list_honours_skip_and_limit() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(create_customer(&app.service, &auth, &unique_code("PG")).await);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/customers?skip=1&limit=1")
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app.service, req).await;
    let page = page.as_array().unwrap();

    assert_eq!(page.len(), 1);
    assert!(ids.contains(&page[0]["id"].as_str().unwrap().to_string()));
}

#[actix_web::test]
async fn malformed_query_is_bad_request() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);

    let req = test::TestRequest::get()
        .uri("/api/v1/customers?limit=lots")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app.service, req).await;

    assert_problem_details(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST).await;
}

#[actix_web::test]
async fn delete_then_fetch_is_not_found() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let id = create_customer(&app.service, &auth, &unique_code("DEL")).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customers/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app.service, req).await;
    assert_eq!(body["message"], "Customer deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app.service, req).await;
    assert_problem_details(resp, "CUSTOMER_NOT_FOUND", StatusCode::NOT_FOUND).await;
}

#[actix_web::test]
async fn oversized_body_is_rejected() {
    let app = spawn_app().await;
    let auth = bearer(&app.state, &[]);
    let mut body = customer_body(&unique_code("BIG"));
    body["name"] = json!("x".repeat(3 * 1024 * 1024));

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", auth))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app.service, req).await;

    assert_problem_details(resp, "PAYLOAD_TOO_LARGE", StatusCode::PAYLOAD_TOO_LARGE).await;
}
