//! Database service client abstraction
//!
//! Handlers depend on the [`DatabaseClient`] capability only, so any backend
//! (or a test double) that can answer "select all rows of a collection" fits.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::QueryResponse;
use crate::{Error, Result};

pub mod rest;

pub use rest::{RestClient, RestClientFactory};

/// Handle to the external database service.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Select every field of every row in `collection`.
    ///
    /// Failures reported by the service come back inside the response;
    /// `Err` is reserved for failures of this process (e.g. an undecodable
    /// body).
    async fn select_all(&self, collection: &str) -> Result<QueryResponse<Value>>;
}

/// Produces client handles from connection parameters.
pub trait ClientFactory: Send + Sync {
    fn create(&self, url: &str, key: &str) -> Result<Arc<dyn DatabaseClient>>;
}

/// Create a standalone REST client for the service at `url`.
///
/// No request is sent until the first query.
pub fn create_client(url: &str, key: &str) -> Result<RestClient> {
    validate_connection(url, key)?;
    Ok(RestClient::new(reqwest::Client::new(), url, key))
}

/// Reject empty connection parameters.
pub fn validate_connection(url: &str, key: &str) -> Result<()> {
    if url.is_empty() || key.is_empty() {
        return Err(Error::configuration(
            "database service url and key must be configured (SERVICE_URL, SERVICE_KEY)",
        ));
    }
    Ok(())
}
