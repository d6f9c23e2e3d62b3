//! Utility modules supporting the harvester.
//!
//! - [`HttpClient`]: HTTP client with user-agent and timeout defaults
//! - [`text`]: cleanup helpers for feed and API text fields

mod http;
pub mod text;

pub use http::HttpClient;
