use super::env::var_or;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./savannah_orders.db?mode=rwc";

/// Database URL from `DATABASE_URL`, defaulting to a local SQLite file.
pub fn db_url() -> String {
    var_or("DATABASE_URL", DEFAULT_DATABASE_URL)
}

/// In-memory SQLite needs a single pooled connection, otherwise every
/// connection sees its own empty database.
pub fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}
