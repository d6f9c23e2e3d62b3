//! # arXiv Harvester
//!
//! Retrieves recently announced papers in a fixed set of arXiv categories
//! via the category RSS feeds, falling back to the search API when a feed
//! comes back empty, and persists the merged result as a JSON file.
//!
//! ## Architecture
//!
//! - [`models`]: the `Paper` record and arXiv-id ordering
//! - [`sources`]: collaborator boundary (feed/API traits, wire records,
//!   errors) and the concrete HTTP clients
//! - [`harvest`]: RSS-first retrieval, API fallback chain and merge/dedup
//! - [`config`]: configuration management
//! - [`storage`]: JSON persistence
//! - [`utils`]: HTTP client and text cleanup helpers

pub mod config;
pub mod harvest;
pub mod models;
pub mod sources;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use harvest::{merge_paper_lists, Harvester, CATEGORIES};
pub use models::Paper;
pub use sources::RetrievalError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
