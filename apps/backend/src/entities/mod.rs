pub mod customers;
pub mod orders;

pub use customers::Entity as Customers;
pub use customers::Model as Customer;
pub use orders::Entity as Orders;
pub use orders::Model as Order;
