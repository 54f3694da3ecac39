// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::stores::{product_store::ProductStore, request_log::RequestLog, user_registry::UserRegistry};
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup and handed to every handler through axum's
/// `State`. All fields are wrapped in Arc for cheap cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// User registry mutated by `POST /users`
    pub registry: Arc<UserRegistry>,

    /// Captured POST requests for the request viewer
    pub request_log: Arc<RequestLog>,

    /// Simulated product database
    pub product_store: Arc<ProductStore>,

    /// Metrics collector for tracking statistics
    pub metrics: Arc<Metrics>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state with the registry seeded from configuration
    pub fn new(config: Config) -> Self {
        let registry = UserRegistry::new(config.registry.seed_users());
        Self::with_registry(config, registry)
    }

    /// Build state around an existing registry
    pub fn with_registry(config: Config, registry: UserRegistry) -> Self {
        let config = Arc::new(config);

        Self {
            registry: Arc::new(registry),
            request_log: Arc::new(RequestLog::new(config.viewer.max_requests)),
            product_store: Arc::new(ProductStore::new(config.product.failure_rate)),
            metrics: Arc::new(Metrics::new()),
            config,
        }
    }
}
