//! Unique test data so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A customer code that fits the 50-character column.
///
/// ```
/// use backend_test_support::unique_helpers::unique_code;
///
/// let a = unique_code("CUST");
/// let b = unique_code("CUST");
/// assert_ne!(a, b);
/// assert!(a.len() <= 50);
/// ```
pub fn unique_code(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    format!("{}-{}", prefix, &ulid[ulid.len() - 10..])
}

/// A unique email address under the reserved `.test` TLD.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new().to_string().to_lowercase())
}
