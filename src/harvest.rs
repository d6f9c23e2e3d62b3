//! Two-source retrieval pipeline: RSS first, search-API fallback, merge.
//!
//! Each category is harvested independently and statelessly. The RSS feed is
//! consulted first with a one-day conditional-fetch cutoff; only when it
//! yields nothing does the search API run, seeded with the feed's timestamp
//! and most recent id so already-announced papers are not fetched again. An
//! empty API result triggers exactly one retry with the window pushed back
//! another seven days.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{is_earlier, Paper};
use crate::sources::{
    FeedResponse, FeedSource, RetrievalError, SearchRequest, SearchSource, ARXIV_MAX_RESULTS,
};
use crate::utils::text::{
    clean_api_summary, clean_feed_summary, split_authors, strip_title_annotation,
};

/// Categories harvested on every run, in output order.
pub const CATEGORIES: [&str; 2] = ["cs.AI", "cs.LG"];

/// How far back the conditional feed fetch reaches, in days.
const FEED_CUTOFF_DAYS: i64 = 1;

/// Width of the submitted-date window handed to the search API, in days.
const API_WINDOW_DAYS: i64 = 7;

/// Announce type marking a fresh submission (as opposed to a cross-list or
/// a replacement).
const ANNOUNCE_TYPE_NEW: &str = "new";

/// What one feed fetch produced: the accepted papers plus the continuation
/// state the API fallback needs.
#[derive(Debug, Default)]
pub struct RssBatch {
    /// Papers accepted from the feed.
    pub papers: Vec<Paper>,

    /// Feed-level timestamp, if it parsed.
    pub updated: Option<DateTime<Utc>>,

    /// Id embedded in the first (most recent) entry's link.
    pub last_id: Option<String>,
}

/// Layout of the feed-level `updated` field. The offset is a literal:
/// anything other than `+0000` fails to parse and the timestamp is
/// treated as absent.
const FEED_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Per-category retrieval over a feed source and a search source.
#[derive(Debug)]
pub struct Harvester<F, S> {
    feed: F,
    search: S,
    config: Config,
}

impl<F: FeedSource, S: SearchSource> Harvester<F, S> {
    /// Create a harvester over the given collaborators.
    pub fn new(feed: F, search: S, config: Config) -> Self {
        Self {
            feed,
            search,
            config,
        }
    }

    /// Fetch one category's feed and extract candidate papers.
    ///
    /// A 304 answer or an entry-less feed yields an empty batch with no
    /// continuation state. Entries are kept only when they are new
    /// announcements whose primary category contains the requested category;
    /// with `force_primary` set, the primary category must match exactly.
    pub async fn fetch_from_rss(&self, category: &str) -> Result<RssBatch, RetrievalError> {
        let cutoff = Utc::now() - Duration::days(FEED_CUTOFF_DAYS);
        let feed = match self.feed.fetch(category, cutoff).await? {
            FeedResponse::NotModified => {
                if self.config.output.debug_messages {
                    info!(category, %cutoff, "no new papers since cutoff");
                }
                return Ok(RssBatch::default());
            }
            FeedResponse::Feed(feed) => feed,
        };

        info!(category, entries = feed.entries.len(), "feed fetched");
        if feed.entries.is_empty() {
            return Ok(RssBatch::default());
        }

        let last_id = feed.entries[0]
            .link
            .rsplit('/')
            .next()
            .map(str::to_string);

        let updated = feed.updated.as_deref().and_then(|raw| {
            match NaiveDateTime::parse_from_str(raw, FEED_DATE_FORMAT) {
                Ok(ts) => Some(ts.and_utc()),
                Err(err) => {
                    warn!(category, raw, %err, "unparseable feed timestamp");
                    None
                }
            }
        });

        let mut papers = Vec::new();
        for entry in &feed.entries {
            if entry.announce_type != ANNOUNCE_TYPE_NEW {
                continue;
            }

            let primary = entry.categories.first().map(String::as_str).unwrap_or("");
            if self.config.filtering.force_primary && primary != category {
                info!(
                    category,
                    title = %entry.title,
                    primary,
                    "ignoring entry outside its primary category"
                );
                continue;
            }
            if !primary.contains(category) {
                debug!(title = %entry.title, primary, "entry not in requested category");
                continue;
            }

            let arxiv_id = entry
                .link
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
            papers.push(Paper::new(
                split_authors(&entry.authors),
                strip_title_annotation(&entry.title),
                clean_feed_summary(&entry.summary),
                arxiv_id,
            ));
        }

        info!(category, count = papers.len(), "accepted feed entries");
        Ok(RssBatch {
            papers,
            updated,
            last_id,
        })
    }

    /// Fetch candidate papers from the search API.
    ///
    /// The window is seven days ending at `reference` (now when absent).
    /// With `last_id` set, anything at or before that id is dropped so the
    /// API only contributes papers newer than what the feed already
    /// announced.
    pub async fn fetch_from_api(
        &self,
        category: &str,
        reference: Option<DateTime<Utc>>,
        last_id: Option<&str>,
    ) -> Result<Vec<Paper>, RetrievalError> {
        let until = reference.unwrap_or_else(Utc::now);
        let request = SearchRequest {
            category: category.to_string(),
            from: until - Duration::days(API_WINDOW_DAYS),
            until,
            max_results: ARXIV_MAX_RESULTS,
        };

        let hits = self.search.search(&request).await?;
        debug!(category, hits = hits.len(), "search API answered");

        let mut papers = Vec::new();
        for hit in hits {
            if let Some(last_id) = last_id {
                if is_earlier(&hit.short_id, last_id) {
                    continue;
                }
            }
            if !hit.categories.iter().any(|c| c == category) {
                continue;
            }
            papers.push(Paper::new(
                hit.authors,
                hit.title,
                clean_api_summary(&hit.summary),
                hit.short_id,
            ));
        }
        Ok(papers)
    }

    /// Per-category fallback chain.
    ///
    /// RSS first; a non-empty feed result is final and the API is never
    /// consulted. An empty feed result falls through to the API, and an empty
    /// API result is retried once with the reference timestamp pushed back
    /// another seven days (an absent timestamp stays absent, so the retry
    /// window is again anchored at now).
    pub async fn harvest_category(&self, category: &str) -> Result<Vec<Paper>, RetrievalError> {
        let batch = self.fetch_from_rss(category).await?;
        if !batch.papers.is_empty() {
            return Ok(batch.papers);
        }

        info!(category, "feed empty, falling back to search API");
        let mut api_papers = self
            .fetch_from_api(category, batch.updated, batch.last_id.as_deref())
            .await?;

        if api_papers.is_empty() {
            info!(category, "search API empty, retrying with a wider window");
            let extended = batch.updated.map(|ts| ts - Duration::days(API_WINDOW_DAYS));
            api_papers = self
                .fetch_from_api(category, extended, batch.last_id.as_deref())
                .await?;
        }

        Ok(merge_paper_lists(batch.papers, api_papers))
    }

    /// Harvest the whole fixed category list, concatenating per-category
    /// results in list order.
    ///
    /// A paper cross-listed in two requested categories appears once per
    /// category; the output is deliberately not deduplicated across
    /// categories.
    pub async fn harvest_all(&self) -> Result<Vec<Paper>, RetrievalError> {
        let mut all_papers = Vec::new();
        for category in CATEGORIES {
            let papers = self.harvest_category(category).await?;
            info!(category, count = papers.len(), "harvested category");
            all_papers.extend(papers);
        }
        Ok(all_papers)
    }
}

/// Merge the RSS-sourced and API-sourced lists into one unique-by-id list.
///
/// API papers come first in their own order and win ties on id; RSS papers
/// whose id is not already present are appended in RSS order. No further
/// sorting is applied.
pub fn merge_paper_lists(rss_papers: Vec<Paper>, api_papers: Vec<Paper>) -> Vec<Paper> {
    let api_ids: HashSet<String> = api_papers.iter().map(|p| p.arxiv_id.clone()).collect();

    let mut merged = api_papers;
    for paper in rss_papers {
        if !api_ids.contains(&paper.arxiv_id) {
            merged.push(paper);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, title: &str) -> Paper {
        Paper::new(vec!["A".to_string()], title, "abstract", id)
    }

    #[test]
    fn test_merge_disjoint_keeps_api_first() {
        let rss = vec![paper("2401.00001v1", "r1"), paper("2401.00002v1", "r2")];
        let api = vec![paper("2401.00003v1", "a1")];

        let merged = merge_paper_lists(rss, api);
        let ids: Vec<&str> = merged.iter().map(|p| p.arxiv_id.as_str()).collect();
        assert_eq!(ids, vec!["2401.00003v1", "2401.00001v1", "2401.00002v1"]);
    }

    #[test]
    fn test_merge_api_copy_wins_ties() {
        let rss = vec![paper("2401.00001v1", "rss title")];
        let api = vec![paper("2401.00001v1", "api title")];

        let merged = merge_paper_lists(rss, api);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "api title");
    }

    #[test]
    fn test_merge_idempotent_on_id_sets() {
        let list = vec![paper("2401.00001v1", "a"), paper("2401.00002v1", "b")];
        let merged = merge_paper_lists(list.clone(), list.clone());
        assert_eq!(merged, list);
    }

    #[test]
    fn test_merge_both_empty() {
        assert!(merge_paper_lists(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_one_side_empty() {
        let list = vec![paper("2401.00001v1", "a")];
        assert_eq!(merge_paper_lists(list.clone(), Vec::new()), list);
        assert_eq!(merge_paper_lists(Vec::new(), list.clone()), list);
    }
}
