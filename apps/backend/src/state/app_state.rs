use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::{AuthGuard, TokenService};
use crate::services::notifications::OrderNotifier;

/// Shared, read-only application state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in some tests)
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub guard: AuthGuard,
    pub notifier: Arc<dyn OrderNotifier>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        tokens: TokenService,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        Self {
            db,
            security: tokens.config().clone(),
            guard: AuthGuard::new(tokens),
            notifier,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn tokens(&self) -> &TokenService {
        self.guard.tokens()
    }

    /// No database, test secret, notifications recorded in memory.
    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        Self::new(
            None,
            TokenService::new(SecurityConfig::for_tests()),
            Arc::new(crate::services::notifications::RecordingNotifier::new()),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
