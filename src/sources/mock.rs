//! Mock feed and search sources for testing purposes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::sources::{
    FeedResponse, FeedSource, RetrievalError, SearchHit, SearchRequest, SearchSource,
};

/// A mock feed source returning a predefined response.
#[derive(Debug, Default)]
pub struct MockFeedSource {
    response: Mutex<Option<FeedResponse>>,
    categories_seen: Mutex<Vec<String>>,
}

impl MockFeedSource {
    /// Create a mock answering every fetch with an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned by subsequent fetches.
    pub fn set_response(&self, response: FeedResponse) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(response);
    }

    /// Categories requested so far, in call order.
    pub fn categories_seen(&self) -> Vec<String> {
        self.categories_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(
        &self,
        category: &str,
        _modified_since: DateTime<Utc>,
    ) -> Result<FeedResponse, RetrievalError> {
        self.categories_seen
            .lock()
            .unwrap()
            .push(category.to_string());
        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(response) => Ok(response.clone()),
            None => Ok(FeedResponse::Feed(Default::default())),
        }
    }
}

/// A mock search source serving queued responses and recording requests.
#[derive(Debug, Default)]
pub struct MockSearchSource {
    responses: Mutex<VecDeque<Vec<SearchHit>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchSource {
    /// Create a mock answering every search with no hits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; each search consumes one, empty once drained.
    pub fn push_response(&self, hits: Vec<SearchHit>) {
        self.responses.lock().unwrap().push_back(hits);
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of searches performed.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchSource for MockSearchSource {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, RetrievalError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Helper to build a search hit for tests.
pub fn make_hit(short_id: &str, title: &str, categories: &[&str]) -> SearchHit {
    SearchHit {
        short_id: short_id.to_string(),
        title: title.to_string(),
        summary: format!("Abstract of {}", title),
        authors: vec!["Test Author".to_string()],
        categories: categories.iter().map(|c| c.to_string()).collect(),
    }
}
