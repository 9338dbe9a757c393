//! DTOs for orders_sea adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub id: String,
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    pub time: OffsetDateTime,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub item: Option<String>,
    pub amount: Option<f64>,
    pub time: Option<OffsetDateTime>,
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.amount.is_none() && self.time.is_none()
    }
}
