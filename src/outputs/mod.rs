//! Rendering of scraped articles.
//!
//! # Submodules
//!
//! - [`json`]: JSON rendering and JSON file output
//! - [`text`]: plain-text listing for reading in a terminal
//!
//! [`render`] picks one of the formats for standard output. The default,
//! [`OutputFormat::Pretty`], dumps the record list as a pretty-printed
//! structure.

pub mod json;
pub mod text;

use crate::models::Article;
use clap::ValueEnum;

/// How the article list is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed record structure
    #[default]
    Pretty,
    /// Pretty-printed JSON array
    Json,
    /// One readable block per article
    Text,
}

/// Render `articles` in `format`, preserving their order.
pub fn render(articles: &[Article], format: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Pretty => format!("{articles:#?}"),
        OutputFormat::Json => json::to_json(articles)?,
        OutputFormat::Text => text::to_text(articles),
    })
}
