//! SeaORM adapter for the customers table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::customers;

pub mod dto;

pub use dto::{CustomerCreate, CustomerUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find_by_id(id.to_owned()).one(conn).await
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Code.eq(code))
        .one(conn)
        .await
}

/// Oldest first, ties broken by id so pages are stable.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .order_by_asc(customers::Column::CreatedAt)
        .order_by_asc(customers::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<customers::Model, sea_orm::DbErr> {
    customers::ActiveModel {
        id: Set(dto.id),
        name: Set(dto.name),
        code: Set(dto.code),
        phone_number: Set(dto.phone_number),
        email: Set(dto.email),
        created_at: Set(OffsetDateTime::now_utc()),
        updated_at: Set(None),
    }
    .insert(conn)
    .await
}

/// Apply `dto` to an existing row and stamp `updated_at`.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    existing: customers::Model,
    dto: CustomerUpdate,
) -> Result<customers::Model, sea_orm::DbErr> {
    let mut active: customers::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        active.name = Set(name);
    }
    if let Some(phone_number) = dto.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(email) = dto.email {
        active.email = Set(email);
    }
    active.updated_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = customers::Entity::delete_by_id(id.to_owned())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
