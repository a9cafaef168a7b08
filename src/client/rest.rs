//! REST backend for PostgREST-style database services
//!
//! Rows are read with `GET {url}/rest/v1/{collection}?select=*`, authenticated
//! by the service key in both the `apikey` header and a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde_json::Value;

use crate::types::{QueryResponse, ServiceError};
use crate::Result;

use super::{validate_connection, ClientFactory, DatabaseClient};

/// REST client bound to one service url and key.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    key: String,
}

impl RestClient {
    pub(crate) fn new(http: reqwest::Client, url: &str, key: &str) -> Self {
        Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}?select=*", self.base_url, collection)
    }

    /// Build the error reported for a non-success status.
    fn status_error(status: StatusCode, body: &[u8]) -> ServiceError {
        if let Ok(error) = serde_json::from_slice::<ServiceError>(body) {
            return error;
        }

        let message = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        let error = ServiceError::new(message).with_code(status.as_u16().to_string());
        let text = String::from_utf8_lossy(body);
        if text.trim().is_empty() {
            error
        } else {
            error.with_details(text.trim())
        }
    }

    fn fetch_error(err: &reqwest::Error) -> ServiceError {
        ServiceError::new(format!("FetchError: {err}"))
    }
}

#[async_trait]
impl DatabaseClient for RestClient {
    async fn select_all(&self, collection: &str) -> Result<QueryResponse<Value>> {
        let url = self.collection_url(collection);
        tracing::debug!(%collection, "Querying database service");

        let response = match self
            .http
            .get(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Database service request failed");
                return Ok(QueryResponse::failed(Self::fetch_error(&e)));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Failed reading database service response");
                return Ok(QueryResponse::failed(Self::fetch_error(&e)));
            }
        };

        if !status.is_success() {
            tracing::warn!(%collection, status = status.as_u16(), "Database service rejected query");
            return Ok(QueryResponse::failed(Self::status_error(status, &body)));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(QueryResponse::empty());
        }

        let rows: Option<Vec<Value>> = serde_json::from_slice(&body)?;
        Ok(QueryResponse { data: rows, error: None })
    }
}

/// Hands out [`RestClient`]s that share one connection pool.
#[derive(Clone, Default)]
pub struct RestClientFactory {
    http: reqwest::Client,
}

impl RestClientFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientFactory for RestClientFactory {
    fn create(&self, url: &str, key: &str) -> Result<Arc<dyn DatabaseClient>> {
        validate_connection(url, key)?;
        Ok(Arc::new(RestClient::new(self.http.clone(), url, key)))
    }
}
