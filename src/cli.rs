//! Command-line interface definitions.
//!
//! Every argument is optional: running the binary bare scrapes the default
//! query and pretty-prints the result.

use crate::outputs::OutputFormat;
use crate::scrapers::google_news::{BASE_URL, DEFAULT_QUERY};
use clap::Parser;

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Default query, pretty-printed
/// google_news_scraper
///
/// # Custom query as JSON, also saved to a file
/// google_news_scraper "offshore wind" --format json --output ./out/wind.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search query; normalized to lowercase `+`-joined terms
    #[arg(default_value = DEFAULT_QUERY)]
    pub query: String,

    /// How to print the articles on standard output
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Also write the articles as JSON to this file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Feed endpoint the query is appended to
    #[arg(long, env = "GOOGLE_NEWS_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,
}
