//! # Google News Scraper
//!
//! Fetches the Google News RSS search feed for a query and prints the
//! articles it lists as structured records.
//!
//! ## Usage
//!
//! ```sh
//! google_news_scraper                        # default query, pretty-printed
//! google_news_scraper "offshore wind" -f json -o ./wind.json
//! ```
//!
//! ## Pipeline
//!
//! 1. **Query**: normalize the query into the feed URL
//! 2. **Fetch**: one GET for the feed document
//! 3. **Extract**: turn every `<item>` into an [`models::Article`]
//! 4. **Output**: print the list, optionally write it as JSON
//!
//! Any failure along the way ends the run with a non-zero exit code.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod error;
mod feed;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::json;
use scrapers::google_news::{GoogleNewsScraper, HttpFeedSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let scraper = GoogleNewsScraper::with_base_url(
        &args.base_url,
        &args.query,
        HttpFeedSource::new(reqwest::Client::new()),
    )?;
    debug!(query = scraper.query(), url = %scraper.url(), "Scraper ready");

    let articles = match scraper.scrape_articles().await {
        Ok(articles) => articles,
        Err(e) => {
            error!(url = %scraper.url(), error = %e, "Scrape failed");
            return Err(e.into());
        }
    };

    if let Some(ref path) = args.output {
        json::write_articles(&articles, Path::new(path)).await?;
    }

    println!("{}", outputs::render(&articles, args.format)?);

    let elapsed = start_time.elapsed();
    info!(?elapsed, count = articles.len(), "Execution complete");

    Ok(())
}
