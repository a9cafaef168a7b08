//! Shared test doubles

#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use blogfront::client::{validate_connection, ClientFactory, DatabaseClient};
use blogfront::types::{QueryResponse, ServiceError};
use blogfront::Result;
use serde_json::{json, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// What the fake service answers to every query.
#[derive(Clone)]
pub enum Outcome {
    Respond(QueryResponse<Value>),
    /// Never answers.
    Hang,
}

/// Fake database service that records the collections it was asked for.
pub struct FakeService {
    outcome: Outcome,
    queries: Mutex<Vec<String>>,
    created: AtomicUsize,
}

impl FakeService {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            queries: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
        })
    }

    pub fn rows(rows: Vec<Value>) -> Arc<Self> {
        Self::new(Outcome::Respond(QueryResponse::rows(rows)))
    }

    pub fn failing(error: ServiceError) -> Arc<Self> {
        Self::new(Outcome::Respond(QueryResponse::failed(error)))
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Outcome::Respond(QueryResponse::empty()))
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn clients_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

/// Client factory handing out handles to a shared [`FakeService`].
#[derive(Clone)]
pub struct FakeFactory(pub Arc<FakeService>);

impl ClientFactory for FakeFactory {
    fn create(&self, url: &str, key: &str) -> Result<Arc<dyn DatabaseClient>> {
        validate_connection(url, key)?;
        self.0.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeClient(self.0.clone())))
    }
}

struct FakeClient(Arc<FakeService>);

#[async_trait]
impl DatabaseClient for FakeClient {
    async fn select_all(&self, collection: &str) -> Result<QueryResponse<Value>> {
        self.0.queries.lock().unwrap().push(collection.to_string());
        match &self.0.outcome {
            Outcome::Respond(response) => Ok(response.clone()),
            Outcome::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(QueryResponse::empty())
            }
        }
    }
}

pub fn article_row(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("body of {title}"),
        "created_at": "2024-03-20T12:34:56Z",
        "author": "editor",
    })
}

/// `tracing` layer keeping every event's level and message.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
