//! Post listing
//!
//! Resolves the service connection, queries the `posts` collection and
//! classifies the outcome. Only an upstream query error and a missing result
//! set keep their identity; every other failure is logged and reported as a
//! generic internal error.

use std::time::Instant;

use serde_json::Value;

use crate::client::ClientFactory;
use crate::config::ServiceConfig;
use crate::logger::{self, LogDetail, LogOptions};
use crate::types::Article;
use crate::{Error, Result};

pub const POSTS_COLLECTION: &str = "posts";

pub const RETRIEVAL_FAILED: &str = "an error occurred while retrieving posts";

/// List every post.
///
/// Errors are one of [`Error::UpstreamQuery`], [`Error::NotFound`] or
/// [`Error::Internal`].
pub async fn list_posts(
    config: &ServiceConfig,
    clients: &dyn ClientFactory,
) -> Result<Vec<Article>> {
    match fetch_posts(config, clients).await {
        Ok(posts) => Ok(posts),
        Err(e) if e.is_classified() => Err(e),
        Err(e) => {
            logger::log(
                "post retrieval error",
                Some(LogDetail::error(&e)),
                LogOptions::default().context("posts::list_posts"),
            );
            Err(Error::internal(RETRIEVAL_FAILED))
        }
    }
}

async fn fetch_posts(
    config: &ServiceConfig,
    clients: &dyn ClientFactory,
) -> Result<Vec<Article>> {
    let client = clients.create(config.url(), config.key())?;

    let start = Instant::now();
    let query = client.select_all(POSTS_COLLECTION);
    let response = match config.timeout() {
        Some(limit) => tokio::time::timeout(limit, query)
            .await
            .map_err(|_| Error::Timeout(limit))??,
        None => query.await?,
    };
    let took_ms = start.elapsed().as_millis() as u64;

    if let Some(error) = response.error {
        tracing::warn!(%error, took_ms, "Database service reported a query error");
        return Err(Error::UpstreamQuery(error));
    }

    let rows = response
        .data
        .ok_or_else(|| Error::not_found("no posts found"))?;

    let posts = rows
        .into_iter()
        .map(decode_article)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = posts.len(), took_ms, "Fetched posts");
    Ok(posts)
}

fn decode_article(row: Value) -> Result<Article> {
    Ok(serde_json::from_value(row)?)
}
