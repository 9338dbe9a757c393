use sea_orm::ConnectionTrait;
use tracing::info;
use uuid::Uuid;

use super::Page;
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::customers::{self as customers_repo, Customer, CustomerCreate, CustomerUpdate};

/// Input for a new customer, already validated for shape.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub code: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Create a customer with a fresh UUID. Codes are unique.
pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: NewCustomer,
) -> Result<Customer, DomainError> {
    if customers_repo::code_exists(conn, &input.code).await? {
        return Err(DomainError::duplicate_code());
    }

    // A concurrent insert can still win the race; the unique index catches
    // it and the error translator reports the same DuplicateCode.
    let customer = customers_repo::create(
        conn,
        CustomerCreate {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            code: input.code,
            phone_number: input.phone_number,
            email: input.email,
        },
    )
    .await?;

    info!(
        customer_id = %customer.id,
        code = %customer.code,
        phone = %Redacted(&customer.phone_number),
        "customer.created"
    );
    Ok(customer)
}

pub async fn list_customers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: Page,
) -> Result<Vec<Customer>, DomainError> {
    customers_repo::list(conn, page.skip, page.limit).await
}

pub async fn get_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Customer, DomainError> {
    customers_repo::require(conn, id).await
}

pub async fn update_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    update: CustomerUpdate,
) -> Result<Customer, DomainError> {
    if update.is_empty() {
        return customers_repo::require(conn, id).await;
    }
    customers_repo::update(conn, id, update).await
}

/// Removes the customer together with all of their orders.
pub async fn delete_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    customers_repo::delete(conn, id).await?;
    info!(customer_id = %id, "customer.deleted");
    Ok(())
}
