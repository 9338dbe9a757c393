use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::notifications::OrderConfirmation;
use super::Page;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::customers as customers_repo;
use crate::repos::orders::{self as orders_repo, Order, OrderCreate, OrderUpdate};
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    pub time: OffsetDateTime,
    pub description: String,
}

/// Insert an order for an existing customer, then send the confirmation.
///
/// The existence check and insert share one transaction. The notifier is
/// only called after commit and cannot fail the request.
pub async fn place_order(state: &AppState, input: NewOrder) -> Result<Order, AppError> {
    let (order, customer) = with_txn(state, move |txn| {
        Box::pin(async move {
            let customer = customers_repo::require(txn, &input.customer_id).await?;
            let order = orders_repo::create(
                txn,
                OrderCreate {
                    id: Uuid::new_v4().to_string(),
                    customer_id: customer.id.clone(),
                    item: input.item,
                    amount: input.amount,
                    time: input.time,
                    description: input.description,
                },
            )
            .await?;
            Ok((order, customer))
        })
    })
    .await?;

    info!(order_id = %order.id, customer_id = %order.customer_id, "order.created");

    state.notifier.notify_order_confirmed(OrderConfirmation {
        customer_name: customer.name,
        phone_number: customer.phone_number,
        item: order.item.clone(),
        amount: order.amount,
    });

    Ok(order)
}

pub async fn list_orders<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: Option<&str>,
    page: Page,
) -> Result<Vec<Order>, DomainError> {
    orders_repo::list(conn, customer_id, page.skip, page.limit).await
}

pub async fn get_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Order, DomainError> {
    orders_repo::require(conn, id).await
}

pub async fn update_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    update: OrderUpdate,
) -> Result<Order, DomainError> {
    if update.is_empty() {
        return orders_repo::require(conn, id).await;
    }
    orders_repo::update(conn, id, update).await
}

pub async fn delete_order<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), DomainError> {
    orders_repo::delete(conn, id).await?;
    info!(order_id = %id, "order.deleted");
    Ok(())
}
