//! JSON output.
//!
//! Articles serialize as an array of objects with the same field names as
//! [`Article`]; the published date is an object carrying the naive
//! `datetime` and its `timezone` token.

use crate::models::Article;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `articles` as a pretty-printed JSON array.
pub fn to_json(articles: &[Article]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(articles)
}

/// Write `articles` as JSON to `path`, creating parent directories.
///
/// An existing file at `path` is replaced.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_articles(articles: &[Article], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = to_json(articles)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = articles.len(), "Wrote JSON file");

    Ok(())
}
