//! Paper model and arXiv-id ordering.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A harvested arXiv paper.
///
/// Identity is the arXiv id alone: two records carrying the same id are the
/// same paper no matter what the other fields hold. Fields are never mutated
/// after construction, only replaced or filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    /// Author display names, cleaned of markup.
    pub authors: Vec<String>,

    /// Title, cleaned of trailing feed annotations.
    pub title: String,

    /// Abstract text, entity-decoded with newlines collapsed.
    pub r#abstract: String,

    /// Canonical short id including the version suffix, e.g. "2401.01234v2".
    pub arxiv_id: String,
}

impl Paper {
    /// Create a new paper record.
    pub fn new(
        authors: Vec<String>,
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        arxiv_id: impl Into<String>,
    ) -> Self {
        Self {
            authors,
            title: title.into(),
            r#abstract: abstract_text.into(),
            arxiv_id: arxiv_id.into(),
        }
    }
}

impl PartialEq for Paper {
    fn eq(&self, other: &Self) -> bool {
        self.arxiv_id == other.arxiv_id
    }
}

impl Eq for Paper {}

impl Hash for Paper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.arxiv_id.hash(state);
    }
}

/// Whether id `a` denotes an earlier submission than id `b`.
///
/// Ids look like `<digits>.<digits>[v<version>]`; the version suffix is
/// dropped, the dot removed and the remainders compared as integers. This is
/// an approximation: digit-group widths changed across arXiv id eras, and any
/// malformed id makes the comparison come back `false` instead of failing.
pub fn is_earlier(a: &str, b: &str) -> bool {
    match (id_ordinal(a), id_ordinal(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}

fn id_ordinal(id: &str) -> Option<u64> {
    let base = id.split('v').next().unwrap_or(id);
    base.replace('.', "").parse().ok()
}
