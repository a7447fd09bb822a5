use std::sync::Arc;

use calcgate_core::FixedWindowLimiter;

use crate::config::{RateScope, ServerConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Shared by every request; each client key owns one window inside it.
    pub limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let limiter = FixedWindowLimiter::new(
            config.rate_limit.limit,
            config.rate_limit.interval(),
        );
        Self::with_limiter(config, limiter)
    }

    pub fn with_limiter(config: ServerConfig, limiter: FixedWindowLimiter) -> Self {
        Self {
            config: Arc::new(config),
            limiter: Arc::new(limiter),
        }
    }

    pub fn rate_scope(&self) -> RateScope {
        self.config.rate_limit.scope
    }
}
