//! JSON persistence for harvested papers.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::Paper;
use crate::sources::RetrievalError;

/// File name written under the output directory.
pub const PAPERS_FILE: &str = "papers.json";

/// Write the paper list as an indented JSON array under `output_dir`,
/// creating the directory if it does not exist. Non-ASCII characters are
/// written literally. Returns the path of the written file.
pub fn save_papers(papers: &[Paper], output_dir: &Path) -> Result<PathBuf, RetrievalError> {
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join(PAPERS_FILE);
    let json = serde_json::to_string_pretty(papers)?;
    fs::write(&path, json)?;

    info!(count = papers.len(), path = %path.display(), "saved papers");
    Ok(path)
}
