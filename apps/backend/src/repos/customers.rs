//! Customer repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::customers_sea as customers_adapter;
pub use crate::adapters::customers_sea::{CustomerCreate, CustomerUpdate};
use crate::entities::customers;
use crate::errors::domain::DomainError;

/// Customer domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub code: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            phone_number: model.phone_number,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Customer>, DomainError> {
    Ok(customers_adapter::find_by_id(conn, id).await?.map(Customer::from))
}

/// Like `find_by_id`, but absence is `NotFound`.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Customer, DomainError> {
    find_by_id(conn, id)
        .await?
        .ok_or_else(DomainError::customer_not_found)
}

pub async fn code_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<bool, DomainError> {
    Ok(customers_adapter::find_by_code(conn, code).await?.is_some())
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<Customer>, DomainError> {
    let rows = customers_adapter::list(conn, skip, limit).await?;
    Ok(rows.into_iter().map(Customer::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<Customer, DomainError> {
    Ok(Customer::from(customers_adapter::create(conn, dto).await?))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: CustomerUpdate,
) -> Result<Customer, DomainError> {
    let existing = customers_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(DomainError::customer_not_found)?;
    Ok(Customer::from(
        customers_adapter::update(conn, existing, dto).await?,
    ))
}

/// Deletes the customer and, through the foreign key, their orders.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    match customers_adapter::delete(conn, id).await? {
        0 => Err(DomainError::customer_not_found()),
        _ => Ok(()),
    }
}
