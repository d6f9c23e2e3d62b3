//! Core data model for harvested papers.

mod paper;

pub use paper::{is_earlier, Paper};
