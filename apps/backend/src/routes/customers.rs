use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use super::{validation, ListQuery};
use crate::auth::Principal;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{Validate, ValidatedJson};
use crate::repos::customers::{Customer, CustomerUpdate};
use crate::services::customers::{self as customer_service, NewCustomer};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub code: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Validate for CreateCustomerRequest {
    fn validate(&self) -> Result<(), AppError> {
        validation::text("name", &self.name, 255)?;
        validation::text("code", &self.code, 50)?;
        validation::text("phone_number", &self.phone_number, 20)?;
        if let Some(email) = &self.email {
            validation::email(email)?;
        }
        Ok(())
    }
}

/// Partial update. An explicit `"email": null` clears the email.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
}

impl Validate for UpdateCustomerRequest {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validation::text("name", name, 255)?;
        }
        if let Some(phone_number) = &self.phone_number {
            validation::text("phone_number", phone_number, 20)?;
        }
        if let Some(Some(email)) = &self.email {
            validation::email(email)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub phone_number: String,
    pub email: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            code: c.code,
            phone_number: c.phone_number,
            email: c.email,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

async fn create_customer(
    _principal: Principal,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = customer_service::create_customer(
        require_db(&state)?,
        NewCustomer {
            name: body.name,
            code: body.code,
            phone_number: body.phone_number,
            email: body.email,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

async fn list_customers(
    _principal: Principal,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let customers = customer_service::list_customers(require_db(&state)?, query.page()).await?;
    let body: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_customer(
    _principal: Principal,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer = customer_service::get_customer(require_db(&state)?, &path).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

async fn update_customer(
    _principal: Principal,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let update = CustomerUpdate {
        name: body.name,
        phone_number: body.phone_number,
        email: body.email,
    };
    let customer = customer_service::update_customer(require_db(&state)?, &path, update).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

async fn delete_customer(
    _principal: Principal,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    customer_service::delete_customer(require_db(&state)?, &path).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Customer deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for root in ["", "/"] {
        cfg.service(
            web::resource(root)
                .route(web::post().to(create_customer))
                .route(web::get().to(list_customers)),
        );
    }
    cfg.service(
        web::resource("/{customer_id}")
            .route(web::get().to(get_customer))
            .route(web::put().to(update_customer))
            .route(web::delete().to(delete_customer)),
    );
}
