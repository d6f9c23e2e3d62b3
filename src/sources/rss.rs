//! arXiv RSS feed client.
//!
//! Fetches `https://rss.arxiv.org/rss/<category>` with a conditional GET and
//! maps the RSS 2.0 body onto the [`FeedEntry`] wire records. quick-xml is
//! used instead of a generic feed parser because the items carry the
//! `arxiv:announce_type` extension element, which distinguishes new
//! submissions from cross-lists and replacements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::sources::{Feed, FeedEntry, FeedResponse, FeedSource, RetrievalError};
use crate::utils::HttpClient;

/// Base URL for arXiv category feeds
const ARXIV_RSS_URL: &str = "https://rss.arxiv.org/rss";

/// HTTP date layout used for the If-Modified-Since header.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Conditional-GET client for arXiv category feeds.
#[derive(Debug, Clone)]
pub struct ArxivRssClient {
    client: Arc<HttpClient>,
    base_url: String,
}

impl ArxivRssClient {
    /// Create a new feed client against the public arXiv endpoint.
    pub fn new() -> Result<Self, RetrievalError> {
        Ok(Self {
            client: Arc::new(HttpClient::new()?),
            base_url: ARXIV_RSS_URL.to_string(),
        })
    }

    /// Create with a custom client and base URL (for testing)
    pub fn with_base_url(client: Arc<HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Map an RSS 2.0 body onto the wire records.
    fn parse_feed(body: &str) -> Result<Feed, RetrievalError> {
        let document: RssDocument = from_str(body)?;
        let channel = document.channel;

        let entries = channel
            .items
            .into_iter()
            .map(|item| FeedEntry {
                link: item.link,
                title: item.title,
                summary: item.description,
                authors: item.creator,
                categories: item.categories,
                announce_type: item.announce_type,
            })
            .collect();

        Ok(Feed {
            updated: channel.last_build_date.or(channel.pub_date),
            entries,
        })
    }
}

#[async_trait]
impl FeedSource for ArxivRssClient {
    async fn fetch(
        &self,
        category: &str,
        modified_since: DateTime<Utc>,
    ) -> Result<FeedResponse, RetrievalError> {
        let url = format!("{}/{}", self.base_url, category);
        let cutoff = modified_since.format(HTTP_DATE_FORMAT).to_string();
        debug!(%url, %cutoff, "fetching category feed");

        let response = self
            .client
            .client()
            .get(&url)
            .header("If-Modified-Since", &cutoff)
            .send()
            .await
            .map_err(|e| RetrievalError::Network(format!("Failed to fetch feed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_MODIFIED {
            return Ok(FeedResponse::NotModified);
        }

        if !response.status().is_success() {
            return Err(RetrievalError::Api(format!(
                "Feed returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RetrievalError::Network(format!("Failed to read feed body: {}", e)))?;

        Ok(FeedResponse::Feed(Self::parse_feed(&body)?))
    }
}

// Raw RSS 2.0 document shape. quick-xml resolves namespaces in serde mode,
// so prefixed elements like `dc:creator` are matched by their local names.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssDocument {
    channel: RssChannel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssChannel {
    #[serde(rename = "lastBuildDate")]
    last_build_date: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "item")]
    items: Vec<RssItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RssItem {
    title: String,
    link: String,
    description: String,
    #[serde(rename = "creator")]
    creator: String,
    #[serde(rename = "category")]
    categories: Vec<String>,
    #[serde(rename = "announce_type")]
    announce_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:arxiv="http://arxiv.org/schemas/atom" xmlns:dc="http://purl.org/dc/elements/1.1/" version="2.0">
  <channel>
    <title>cs.AI updates on arXiv.org</title>
    <link>https://rss.arxiv.org/rss/cs.AI</link>
    <description>cs.AI updates on the arXiv.org e-print archive.</description>
    <lastBuildDate>Tue, 27 Aug 2024 00:00:00 +0000</lastBuildDate>
    <pubDate>Tue, 27 Aug 2024 04:00:01 +0000</pubDate>
    <item>
      <title>Learning Things (arXiv:2408.01234v1 [cs.AI])</title>
      <link>https://arxiv.org/abs/2408.01234v1</link>
      <description>arXiv:2408.01234v1 Announce Type: new
Abstract: We study &amp; learn things.</description>
      <dc:creator>Jane Doe, John Smith</dc:creator>
      <category>cs.AI</category>
      <category>cs.LG</category>
      <arxiv:announce_type>new</arxiv:announce_type>
    </item>
    <item>
      <title>Replaced Paper (arXiv:2407.05678v2 [cs.AI])</title>
      <link>https://arxiv.org/abs/2407.05678v2</link>
      <description>arXiv:2407.05678v2 Announce Type: replace
Abstract: Updated.</description>
      <dc:creator>Ada Lovelace</dc:creator>
      <category>cs.AI</category>
      <arxiv:announce_type>replace</arxiv:announce_type>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed() {
        let feed = ArxivRssClient::parse_feed(FEED_BODY).unwrap();

        assert_eq!(
            feed.updated.as_deref(),
            Some("Tue, 27 Aug 2024 00:00:00 +0000")
        );
        assert_eq!(feed.entries.len(), 2);

        let first = &feed.entries[0];
        assert_eq!(first.link, "https://arxiv.org/abs/2408.01234v1");
        assert_eq!(first.authors, "Jane Doe, John Smith");
        assert_eq!(first.categories, vec!["cs.AI", "cs.LG"]);
        assert_eq!(first.announce_type, "new");
        assert!(first.summary.contains("We study & learn things."));

        assert_eq!(feed.entries[1].announce_type, "replace");
    }

    #[test]
    fn test_parse_feed_empty_channel() {
        let body = r#"<?xml version="1.0"?><rss version="2.0"><channel>
            <title>cs.AI</title></channel></rss>"#;
        let feed = ArxivRssClient::parse_feed(body).unwrap();
        assert!(feed.entries.is_empty());
        assert!(feed.updated.is_none());
    }

    #[test]
    fn test_parse_feed_invalid_xml() {
        assert!(matches!(
            ArxivRssClient::parse_feed("this is not xml"),
            Err(RetrievalError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_not_modified() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/cs.AI")
            .match_header("If-Modified-Since", mockito::Matcher::Any)
            .with_status(304)
            .create_async()
            .await;

        let client = ArxivRssClient::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            server.url(),
        );
        let response = client.fetch("cs.AI", Utc::now()).await.unwrap();

        assert!(matches!(response, FeedResponse::NotModified));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_full_feed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/cs.AI")
            .with_status(200)
            .with_header("content-type", "application/rss+xml")
            .with_body(FEED_BODY)
            .create_async()
            .await;

        let client = ArxivRssClient::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            server.url(),
        );
        let response = client.fetch("cs.AI", Utc::now()).await.unwrap();

        match response {
            FeedResponse::Feed(feed) => assert_eq!(feed.entries.len(), 2),
            other => panic!("expected a feed, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cs.AI")
            .with_status(500)
            .create_async()
            .await;

        let client = ArxivRssClient::with_base_url(
            Arc::new(HttpClient::new().unwrap()),
            server.url(),
        );
        let result = client.fetch("cs.AI", Utc::now()).await;

        assert!(matches!(result, Err(RetrievalError::Api(_))));
    }
}
