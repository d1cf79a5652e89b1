//! News feed scrapers.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Google News | [`google_news`] | RSS search feed |
//!
//! A scraper owns the feed URL for its query, fetches the document through a
//! [`google_news::FeedSource`] and turns it into [`crate::models::Article`]s
//! with [`crate::feed::extract`]. Failures are returned, never skipped.

pub mod google_news;
