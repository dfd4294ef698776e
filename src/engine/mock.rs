//! In-memory engine used by unit tests

use super::traits::*;
use crate::error::EngineError;
use crate::query::StructuredQuery;
use crate::search::SearchEndpoint;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the fake engine does when called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Answer with one document echoing the query
    Echo,
    /// Answer with an empty result set
    Empty,
    /// Fail as if the server were unreachable
    Unreachable,
    /// Fail with an engine-level status
    EngineFailure,
}

/// Records everything the fake engines saw
#[derive(Default)]
pub struct Journal {
    pub connects: AtomicUsize,
    pub closes: AtomicUsize,
    pub queries: Mutex<Vec<StructuredQuery>>,
}

pub struct MockConnector {
    pub behavior: Behavior,
    pub fail_close: bool,
    pub fail_connect: bool,
    pub journal: Arc<Journal>,
}

impl MockConnector {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            fail_close: false,
            fail_connect: false,
            journal: Arc::new(Journal::default()),
        }
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }
}

impl EngineConnector for MockConnector {
    fn connect(&self, endpoint: &SearchEndpoint) -> Result<Box<dyn SearchEngine>, EngineError> {
        if self.fail_connect {
            return Err(EngineError::Client("no client".to_string()));
        }
        self.journal.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockEngine {
            base_url: endpoint.url(),
            behavior: self.behavior,
            fail_close: self.fail_close,
            journal: self.journal.clone(),
        }))
    }
}

struct MockEngine {
    base_url: String,
    behavior: Behavior,
    fail_close: bool,
    journal: Arc<Journal>,
}

impl MockEngine {
    fn failure(&self) -> Option<EngineError> {
        match self.behavior {
            Behavior::Unreachable => Some(EngineError::Connectivity(
                "tcp connect error: Connection refused".to_string(),
            )),
            Behavior::EngineFailure => Some(EngineError::Engine {
                status: 500,
                message: "core is loading".to_string(),
            }),
            Behavior::Echo | Behavior::Empty => None,
        }
    }
}

#[async_trait]
impl SearchEngine for MockEngine {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ping(&self) -> Result<PingResponse, EngineError> {
        match self.failure() {
            Some(e) => Err(e),
            None => Ok(PingResponse { status: 0, qtime: 2 }),
        }
    }

    async fn query(&self, query: &StructuredQuery) -> Result<QueryResponse, EngineError> {
        self.journal.queries.lock().unwrap().push(query.clone());
        // Let concurrent callers interleave
        tokio::task::yield_now().await;

        if let Some(e) = self.failure() {
            return Err(e);
        }

        match self.behavior {
            Behavior::Echo => Ok(QueryResponse {
                documents: vec![json!({"id": "1", "q": query.field_query})],
                num_found: 1,
                start: query.offset,
                highlighting: Default::default(),
            }),
            _ => Ok(QueryResponse {
                start: query.offset,
                ..Default::default()
            }),
        }
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        self.journal.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            Err(EngineError::Release("socket already closed".to_string()))
        } else {
            Ok(())
        }
    }
}
