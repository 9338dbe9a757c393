//! SeaORM adapter for the orders table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::orders;

pub mod dto;

pub use dto::{OrderCreate, OrderUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<orders::Model>, sea_orm::DbErr> {
    orders::Entity::find_by_id(id.to_owned()).one(conn).await
}

/// Oldest first; optionally restricted to one customer.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: Option<&str>,
    skip: u64,
    limit: u64,
) -> Result<Vec<orders::Model>, sea_orm::DbErr> {
    let mut query = orders::Entity::find();
    if let Some(customer_id) = customer_id {
        query = query.filter(orders::Column::CustomerId.eq(customer_id));
    }
    query
        .order_by_asc(orders::Column::CreatedAt)
        .order_by_asc(orders::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: OrderCreate,
) -> Result<orders::Model, sea_orm::DbErr> {
    orders::ActiveModel {
        id: Set(dto.id),
        customer_id: Set(dto.customer_id),
        item: Set(dto.item),
        amount: Set(dto.amount),
        time: Set(dto.time),
        description: Set(dto.description),
        created_at: Set(OffsetDateTime::now_utc()),
        updated_at: Set(None),
    }
    .insert(conn)
    .await
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: orders::Model,
    dto: OrderUpdate,
) -> Result<orders::Model, sea_orm::DbErr> {
    let mut active: orders::ActiveModel = existing.into();
    if let Some(item) = dto.item {
        active.item = Set(item);
    }
    if let Some(amount) = dto.amount {
        active.amount = Set(amount);
    }
    if let Some(time) = dto.time {
        active.time = Set(time);
    }
    active.updated_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = orders::Entity::delete_by_id(id.to_owned()).exec(conn).await?;
    Ok(res.rows_affected)
}
