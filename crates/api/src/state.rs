//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::thresholds::ThresholdPolicy;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The threshold policy is built once from the
/// configuration here, so handlers resolve floors without re-merging the
/// override table per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    thresholds: ThresholdPolicy,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let thresholds = ThresholdPolicy::new(
            config.alerts.default_threshold,
            config.alerts.threshold_overrides.clone(),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                thresholds,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the threshold policy.
    #[must_use]
    pub fn thresholds(&self) -> &ThresholdPolicy {
        &self.inner.thresholds
    }
}
