//! Environment-driven configuration, read once at process start.

pub mod db;
pub mod env;
pub mod security;
pub mod sms;

pub use db::db_url;
pub use security::security_from_env;
pub use sms::SmsConfig;
