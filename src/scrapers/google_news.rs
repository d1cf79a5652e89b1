//! Google News RSS search scraper.
//!
//! Builds the search feed URL for a query, downloads the feed through a
//! [`FeedSource`] and hands the bytes to [`crate::feed::extract`].
//!
//! # URL Pattern
//!
//! ```text
//! https://news.google.com/rss/search?q=carbon+net+zero
//! ```

use crate::error::ScrapeError;
use crate::feed;
use crate::models::Article;
use crate::utils::truncate_for_log;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Endpoint of the Google News search feed.
pub const BASE_URL: &str = "https://news.google.com/rss/search";

/// Query used when none is given on the command line.
pub const DEFAULT_QUERY: &str = "Carbon Net Zero";

/// Normalize a free-form query into the `q` parameter of the search URL.
///
/// The query is split on single spaces, each token is lowercased and the
/// tokens are joined with `+`. Runs of spaces are not collapsed, so
/// `"a  b"` becomes `"a++b"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_query("Carbon Net Zero"), "carbon+net+zero");
/// assert_eq!(normalize_query(""), "");
/// ```
pub fn normalize_query(query: &str) -> String {
    query
        .split(' ')
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("+")
}

/// Build `{base_url}?q={normalized query}`.
///
/// Each token is percent-encoded before joining, so reserved characters
/// (`&`, `#`, `+`, ...) stay inside the `q` parameter.
///
/// # Errors
///
/// Returns [`ScrapeError::Url`] if the result is not an absolute URL, which
/// only happens with a bad `base_url`.
pub fn feed_url(base_url: &str, query: &str) -> Result<Url, ScrapeError> {
    let q = query
        .split(' ')
        .map(|token| urlencoding::encode(&token.to_lowercase()).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    let raw = format!("{}?q={}", base_url, q);
    Url::parse(&raw).map_err(|source| ScrapeError::Url { url: raw, source })
}

/// Anything that can hand back the raw bytes of a feed URL.
///
/// The scraper only needs this one capability, which keeps the HTTP client
/// out of tests.
pub trait FeedSource {
    /// Fetch the document at `url`.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ScrapeError>;
}

/// [`FeedSource`] backed by a plain `reqwest` GET.
#[derive(Debug, Clone, Default)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl FeedSource for HttpFeedSource {
    /// Non-2xx responses are reported as [`ScrapeError::Http`].
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ScrapeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.error_for_status()?.bytes().await?;
        debug!(%status, bytes = body.len(), "Fetched feed");
        Ok(body.to_vec())
    }
}

/// Scrapes article records from the Google News search feed for one query.
#[derive(Debug)]
pub struct GoogleNewsScraper<S> {
    query: String,
    url: Url,
    source: S,
}

impl<S: FeedSource> GoogleNewsScraper<S> {
    /// Scraper for `query` against the feed endpoint at `base_url`.
    pub fn with_base_url(base_url: &str, query: &str, source: S) -> Result<Self, ScrapeError> {
        Ok(Self {
            query: normalize_query(query),
            url: feed_url(base_url, query)?,
            source,
        })
    }

    /// The normalized query, before percent-encoding into the `q` parameter.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the feed once and extract every item in document order.
    ///
    /// # Errors
    ///
    /// Transport failures and malformed feeds both abort the scrape; no
    /// partial list is returned.
    #[instrument(level = "info", skip_all, fields(query = %self.query))]
    pub async fn scrape_articles(&self) -> Result<Vec<Article>, ScrapeError> {
        info!("Started scraping {}...", self.url);

        let body = self.source.fetch(&self.url).await?;
        debug!(
            bytes = body.len(),
            preview = %truncate_for_log(&String::from_utf8_lossy(&body), 200),
            "Feed body"
        );

        let articles = feed::extract(&body)?;
        info!(count = articles.len(), "Scraped {} articles.", articles.len());

        Ok(articles)
    }
}
