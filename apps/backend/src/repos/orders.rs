//! Order repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::orders_sea as orders_adapter;
pub use crate::adapters::orders_sea::{OrderCreate, OrderUpdate};
use crate::entities::orders;
use crate::errors::domain::DomainError;

/// Order domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    pub time: OffsetDateTime,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            item: model.item,
            amount: model.amount,
            time: model.time,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Order, DomainError> {
    orders_adapter::find_by_id(conn, id)
        .await?
        .map(Order::from)
        .ok_or_else(DomainError::order_not_found)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: Option<&str>,
    skip: u64,
    limit: u64,
) -> Result<Vec<Order>, DomainError> {
    let rows = orders_adapter::list(conn, customer_id, skip, limit).await?;
    Ok(rows.into_iter().map(Order::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: OrderCreate,
) -> Result<Order, DomainError> {
    Ok(Order::from(orders_adapter::create(conn, dto).await?))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    dto: OrderUpdate,
) -> Result<Order, DomainError> {
    let existing = orders_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(DomainError::order_not_found)?;
    Ok(Order::from(orders_adapter::update(conn, existing, dto).await?))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    match orders_adapter::delete(conn, id).await? {
        0 => Err(DomainError::order_not_found()),
        _ => Ok(()),
    }
}
