//! Error types for feed extraction and scraping.
//!
//! Two layers:
//! - [`FeedError`]: the feed document itself is unusable (bad XML, missing
//!   item fields, unparsable dates).
//! - [`ScrapeError`]: anything that can go wrong during a scrape, including
//!   transport failures and wrapped [`FeedError`]s.
//!
//! Every variant is fatal to a run; nothing here is retried.

use thiserror::Error;

/// Failures raised while turning feed bytes into articles.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("could not decode feed text: {0}")]
    Decode(String),

    #[error("feed ended with {open_elements} element(s) still open after {items} complete item(s)")]
    Truncated { open_elements: usize, items: usize },

    /// `item` is the zero-based position of the offending item in the feed.
    #[error("item {item} has no <{field}> element")]
    MissingField { item: usize, field: &'static str },

    #[error("invalid pubDate {value:?}: expected `Wkd, DD Mon YYYY HH:MM:SS TZ`")]
    InvalidDate { value: String },
}

/// Failures raised by a full scrape (fetch + extract).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid feed URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),
}
