use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use super::validation;
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{Authorized, Validate, ValidatedJson, WriteScope};
use crate::repos::orders::{Order, OrderUpdate};
use crate::services::orders::{self as order_service, NewOrder};
use crate::services::Page;
use crate::state::app_state::AppState;

/// RFC 3339 timestamps; a timestamp without an offset is taken as UTC.
mod order_time {
    use serde::{Deserialize, Deserializer};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{OffsetDateTime, PrimitiveDateTime};

    pub fn parse(raw: &str) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(raw, &Rfc3339).ok().or_else(|| {
            let naive = format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            );
            PrimitiveDateTime::parse(raw, naive)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<OffsetDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom("time must be an ISO 8601 timestamp"))
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<OffsetDateTime>, D::Error> {
            match Option::<String>::deserialize(d)? {
                None => Ok(None),
                Some(raw) => parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom("time must be an ISO 8601 timestamp")
                }),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    #[serde(deserialize_with = "order_time::deserialize")]
    pub time: OffsetDateTime,
    pub description: String,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), AppError> {
        validation::text("customer_id", &self.customer_id, 36)?;
        validation::text("item", &self.item, 255)?;
        validation::amount(self.amount)?;
        if self.description.chars().count() > 500 {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "description must be at most 500 characters",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub item: Option<String>,
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "order_time::option::deserialize")]
    pub time: Option<OffsetDateTime>,
}

impl Validate for UpdateOrderRequest {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(item) = &self.item {
            validation::text("item", item, 255)?;
        }
        if let Some(amount) = self.amount {
            validation::amount(amount)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            item: o.item,
            amount: o.amount,
            time: o.time,
            description: o.description,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub customer_id: Option<String>,
}

async fn create_order(
    _auth: Authorized<WriteScope>,
    state: web::Data<AppState>,
    body: ValidatedJson<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order = order_service::place_order(
        &state,
        NewOrder {
            customer_id: body.customer_id,
            item: body.item,
            amount: body.amount,
            time: body.time,
            description: body.description,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

async fn list_orders(
    _auth: Authorized<WriteScope>,
    state: web::Data<AppState>,
    query: web::Query<OrderListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let orders = order_service::list_orders(
        require_db(&state)?,
        query.customer_id.as_deref().filter(|id| !id.is_empty()),
        Page::new(query.skip, query.limit),
    )
    .await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_order(
    _auth: Authorized<WriteScope>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = order_service::get_order(require_db(&state)?, &path).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

async fn update_order(
    _auth: Authorized<WriteScope>,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: ValidatedJson<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let update = OrderUpdate {
        item: body.item,
        amount: body.amount,
        time: body.time,
    };
    let order = order_service::update_order(require_db(&state)?, &path, update).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

async fn delete_order(
    _auth: Authorized<WriteScope>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    order_service::delete_order(require_db(&state)?, &path).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Order deleted successfully" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for root in ["", "/"] {
        cfg.service(
            web::resource(root)
                .route(web::post().to(create_order))
                .route(web::get().to(list_orders)),
        );
    }
    cfg.service(
        web::resource("/{order_id}")
            .route(web::get().to(get_order))
            .route(web::put().to(update_order))
            .route(web::delete().to(delete_order)),
    );
}

#[cfg(test)]
mod tests {
    use super::order_time;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let with_offset = order_time::parse("2024-01-01T10:00:00+03:00").unwrap();
        let naive = order_time::parse("2024-01-01T07:00:00").unwrap();
        assert_eq!(with_offset, naive);
        assert!(order_time::parse("2024-01-01T07:00:00.250").is_some());
        assert!(order_time::parse("yesterday").is_none());
    }
}
