use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{KeySetCache, TokenService};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::notifications::{OrderNotifier, RecordingNotifier};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the test harness.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_url: Option<String>,
    notifier: Option<Arc<dyn OrderNotifier>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_url: None,
            notifier: None,
        }
    }

    /// Connect to `url` and migrate during `build`.
    pub fn with_db(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn OrderNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match &self.db_url {
            Some(url) => Some(bootstrap_db(url).await?),
            None => None,
        };

        let fetch_key_set = self.security_config.fetch_key_set;
        let jwks_uri = self.security_config.jwks_uri();
        let mut tokens = TokenService::new(self.security_config);
        if fetch_key_set {
            match KeySetCache::new(jwks_uri) {
                Ok(cache) => {
                    info!(jwks_uri = cache.jwks_uri(), "key_set.enabled");
                    tokens = tokens.with_key_set(Arc::new(cache));
                }
                Err(e) => warn!(error = %e, "key_set.disabled"),
            }
        }

        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(RecordingNotifier::new()));

        Ok(AppState::new(db, tokens, notifier))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
