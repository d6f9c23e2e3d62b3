//! Collaborator boundary for the arXiv feed and search API.
//!
//! The harvesting core never touches HTTP or XML directly. It consumes two
//! traits, [`FeedSource`] and [`SearchSource`], whose wire records are plain
//! structs carrying exactly the fields the core reads. The concrete clients
//! ([`ArxivRssClient`], [`ArxivApiClient`]) convert whatever the feed and API
//! libraries return into these records, so the core stays insulated from
//! their shapes.

mod api;
mod rss;

pub mod mock;

pub use api::{ArxivApiClient, ARXIV_MAX_RESULTS};
pub use rss::ArxivRssClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One item from a category RSS feed, reduced to the fields the harvester
/// consumes.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    /// Link to the abstract page; the last path segment is the arXiv id.
    pub link: String,

    /// Raw title, possibly ending in a feed annotation.
    pub title: String,

    /// Raw summary; may contain markup, entities and embedded newlines.
    pub summary: String,

    /// Raw author field: one comma-joined, possibly newline-separated string.
    pub authors: String,

    /// Category terms in feed order; the first is the primary category.
    pub categories: Vec<String>,

    /// "new" for fresh submissions, "cross" or "replace" otherwise.
    pub announce_type: String,
}

/// A parsed category feed.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    /// Feed-level `updated`/`lastBuildDate` string, verbatim.
    pub updated: Option<String>,

    /// Entries in feed order, newest first.
    pub entries: Vec<FeedEntry>,
}

/// Outcome of a conditional feed fetch.
#[derive(Debug, Clone)]
pub enum FeedResponse {
    /// The server answered 304; nothing new since the supplied cutoff.
    NotModified,

    /// A full feed body.
    Feed(Feed),
}

/// Parameters for one search-API query.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Category filter, e.g. "cs.AI".
    pub category: String,

    /// Start of the submitted-date window (inclusive).
    pub from: DateTime<Utc>,

    /// End of the submitted-date window (inclusive).
    pub until: DateTime<Utc>,

    /// Result cap; the arXiv endpoint tops out at 200 per page.
    pub max_results: usize,
}

/// One result record from the search API.
#[derive(Debug, Clone, Default)]
pub struct SearchHit {
    /// Canonical short id including the version suffix, e.g. "2401.01234v2".
    pub short_id: String,

    pub title: String,

    /// Plain-text summary; may still carry entities and embedded newlines.
    pub summary: String,

    pub authors: Vec<String>,

    /// Every category the paper is listed under.
    pub categories: Vec<String>,
}

/// A conditional-fetch RSS feed collaborator.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed for one category, hinting the server that only content
    /// newer than `modified_since` is of interest.
    async fn fetch(
        &self,
        category: &str,
        modified_since: DateTime<Utc>,
    ) -> Result<FeedResponse, RetrievalError>;
}

/// A search-API collaborator returning submissions newest first.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Query the search endpoint for papers submitted inside the request
    /// window, sorted by submission date descending.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, RetrievalError>;
}

#[async_trait]
impl<T: FeedSource + ?Sized> FeedSource for std::sync::Arc<T> {
    async fn fetch(
        &self,
        category: &str,
        modified_since: DateTime<Utc>,
    ) -> Result<FeedResponse, RetrievalError> {
        (**self).fetch(category, modified_since).await
    }
}

#[async_trait]
impl<T: SearchSource + ?Sized> SearchSource for std::sync::Arc<T> {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, RetrievalError> {
        (**self).search(request).await
    }
}

/// Errors surfaced by the feed and search collaborators.
///
/// `Network` marks transient failures a rerun may clear; `Parse` marks a
/// malformed response body; `Api` a non-success status from the endpoint.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, JSON)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The endpoint answered with an error status
    #[error("API error: {0}")]
    Api(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RetrievalError {
    fn from(err: reqwest::Error) -> Self {
        RetrievalError::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for RetrievalError {
    fn from(err: quick_xml::DeError) -> Self {
        RetrievalError::Parse(format!("XML: {}", err))
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        RetrievalError::Parse(format!("JSON: {}", err))
    }
}
