//! API server state

use std::sync::Arc;

use crate::client::{ClientFactory, RestClientFactory};
use crate::config::ServiceConfig;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Database service connection settings
    pub service: Arc<ServiceConfig>,

    /// Source of database client handles
    pub clients: Arc<dyn ClientFactory>,
}

impl AppState {
    pub fn new(service: ServiceConfig, clients: Arc<dyn ClientFactory>) -> Self {
        Self {
            service: Arc::new(service),
            clients,
        }
    }

    /// State backed by the REST service client
    pub fn rest(service: ServiceConfig) -> Self {
        Self::new(service, Arc::new(RestClientFactory::new()))
    }
}
