//! In-memory network double for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{FetchError, Network, Request, Response};

/// Serves canned responses and counts every fetch it sees.
/// Unknown URLs answer 404; `offline` makes every fetch fail.
#[derive(Default)]
pub struct StubNetwork {
    responses: HashMap<String, Response>,
    failing: HashSet<String>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl StubNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn with(mut self, url: &str, response: Response) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Simulate losing connectivity after setup.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for StubNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) || self.failing.contains(&request.url) {
            return Err(FetchError::Unavailable(request.url.clone()));
        }
        Ok(self
            .responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Response::new(&request.url, 404, "Not Found")))
    }
}
