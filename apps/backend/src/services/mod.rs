//! Business rules on top of the repos.

pub mod customers;
pub mod notifications;
pub mod orders;

pub const DEFAULT_PAGE_LIMIT: u64 = 100;
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    /// Defaults to the first 100 rows; `limit` is clamped to `1..=1000`.
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(Page::default(), Page { skip: 0, limit: 100 });
        assert_eq!(Page::new(Some(5), Some(0)).limit, 1);
        assert_eq!(Page::new(None, Some(5000)).limit, 1000);
        assert_eq!(Page::new(Some(20), Some(10)), Page { skip: 20, limit: 10 });
    }
}
