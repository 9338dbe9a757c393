//! DTOs for customers_sea adapter.

/// DTO for inserting a customer. The id is assigned by the caller.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub id: String,
    pub name: String,
    pub code: String,
    pub phone_number: String,
    pub email: Option<String>,
}

/// Partial update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    /// `Some(None)` clears the email
    pub email: Option<Option<String>>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.email.is_none()
    }
}
