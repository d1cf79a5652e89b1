//! Data models for scraped feed articles.
//!
//! - [`Article`]: one feed item flattened into a record
//! - [`PublishedDate`]: the item's `pubDate`, parsed into a structured value
//!
//! Records are built once by the extractor and never mutated afterwards.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timezone tokens that are interpreted as UTC by [`PublishedDate::as_utc`].
const UTC_ALIASES: [&str; 4] = ["GMT", "UTC", "UT", "Z"];

/// A single article as listed in a news search feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Absolute URL of the article (usually a news.google.com redirect).
    pub link: String,
    /// Headline, often suffixed with ` - Publisher`.
    pub title: String,
    /// HTML snippet as carried in the feed.
    pub description: String,
    /// Name of the outlet, from the item's `<source>` element.
    pub publisher: String,
    pub published_date: PublishedDate,
}

/// A publication timestamp together with the timezone token it was written in.
///
/// The feed only carries abbreviations like `GMT`, so the wall-clock time is
/// kept naive and the token is stored verbatim next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedDate {
    pub datetime: NaiveDateTime,
    pub timezone: String,
}

impl PublishedDate {
    pub fn new(datetime: NaiveDateTime, timezone: impl Into<String>) -> Self {
        Self {
            datetime,
            timezone: timezone.into(),
        }
    }

    /// Resolve to an absolute UTC instant when the timezone token names UTC.
    ///
    /// Other abbreviations (`EST`, `CET`, ...) are ambiguous and yield `None`.
    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        let tz = self.timezone.to_ascii_uppercase();
        UTC_ALIASES
            .contains(&tz.as_str())
            .then(|| self.datetime.and_utc())
    }
}
