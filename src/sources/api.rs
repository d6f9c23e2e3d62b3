//! arXiv search API client.
//!
//! Queries `http://export.arxiv.org/api/query` for papers submitted inside a
//! date window and maps the Atom response onto [`SearchHit`] wire records.

use async_trait::async_trait;
use feed_rs::parser;
use std::sync::Arc;
use tracing::debug;

use crate::sources::{RetrievalError, SearchHit, SearchRequest, SearchSource};
use crate::utils::HttpClient;

/// Base URL for the arXiv API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Hard cap the arXiv endpoint enforces on a single query page.
pub const ARXIV_MAX_RESULTS: usize = 200;

/// Layout of submitted-date bounds inside the search query.
const SUBMITTED_DATE_FORMAT: &str = "%Y%m%d";

/// Client for the arXiv search API.
#[derive(Debug, Clone)]
pub struct ArxivApiClient {
    client: Arc<HttpClient>,
    base_url: String,
}

impl ArxivApiClient {
    /// Create a new search client against the public arXiv endpoint.
    pub fn new() -> Result<Self, RetrievalError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            base_url: ARXIV_API_URL.to_string(),
        })
    }

    /// Create with a custom client and base URL (for testing)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the search expression for one request.
    fn build_query(request: &SearchRequest) -> String {
        format!(
            "cat:{} AND submittedDate:[{} TO {}]",
            request.category,
            request.from.format(SUBMITTED_DATE_FORMAT),
            request.until.format(SUBMITTED_DATE_FORMAT)
        )
    }

    /// Map an Atom entry onto a wire record.
    ///
    /// The entry id is the abstract-page URL; its last path segment is the
    /// short id, version suffix included.
    fn parse_entry(entry: &feed_rs::model::Entry) -> Result<SearchHit, RetrievalError> {
        let short_id = entry
            .id
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| RetrievalError::Parse(format!("Entry id has no short id: {}", entry.id)))?
            .to_string();

        Ok(SearchHit {
            short_id,
            title: entry
                .title
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default(),
            summary: entry
                .summary
                .as_ref()
                .map(|s| s.content.clone())
                .unwrap_or_default(),
            authors: entry.authors.iter().map(|a| a.name.clone()).collect(),
            categories: entry.categories.iter().map(|c| c.term.clone()).collect(),
        })
    }
}

#[async_trait]
impl SearchSource for ArxivApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>, RetrievalError> {
        let query = Self::build_query(request);
        let max_results = request.max_results.min(ARXIV_MAX_RESULTS); // arXiv max is 200

        let url = format!(
            "{}?search_query={}&start=0&max_results={}&sortBy=submittedDate&sortOrder=descending",
            self.base_url,
            urlencoding::encode(&query),
            max_results
        );
        debug!(%url, "querying search API");

        let response = self
            .client
            .client()
            .get(&url)
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| RetrievalError::Network(format!("Failed to fetch search results: {}", e)))?;

        if !response.status().is_success() {
            return Err(RetrievalError::Api(format!(
                "Search API returned status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RetrievalError::Network(format!("Failed to read response: {}", e)))?;

        let feed = parser::parse(bytes.as_ref())
            .map_err(|e| RetrievalError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        feed.entries.iter().map(Self::parse_entry).collect()
    }
}
