use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use crate::models::insight::InsightRequest;
use crate::services::InsightProvider;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Empty,
    Error(String),
}

/// Test double for the insight provider that counts calls and remembers the
/// last request.
#[derive(Debug, Clone)]
pub struct MockInsightProvider {
    reply: Reply,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<InsightRequest>>>,
}

impl MockInsightProvider {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Error(message.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<InsightRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl InsightProvider for MockInsightProvider {
    async fn generate(&self, request: &InsightRequest) -> anyhow::Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());

        match &self.reply {
            Reply::Text(text) => Ok(Some(text.clone())),
            Reply::Empty => Ok(None),
            Reply::Error(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}
