//! Plain-text listing of articles.

use crate::models::Article;
use crate::utils::html_to_text;

/// One block per article, separated by blank lines.
///
/// Dates in a UTC zone are shown as RFC 3339; others keep their zone token.
///
/// ```text
/// 1. Net zero plan unveiled - The Daily
///    The Daily | 2023-01-02T15:04:05+00:00
///    https://news.google.com/rss/articles/abc
///    Net zero plan unveiled The Daily
/// ```
pub fn to_text(articles: &[Article]) -> String {
    let mut out = String::new();
    for (i, article) in articles.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}. {}\n", i + 1, article.title));
        let published = match article.published_date.as_utc() {
            Some(utc) => utc.to_rfc3339(),
            None => format!(
                "{} {}",
                article.published_date.datetime, article.published_date.timezone
            ),
        };
        out.push_str(&format!("   {} | {}\n", article.publisher, published));
        out.push_str(&format!("   {}\n", article.link));

        let summary = html_to_text(&article.description);
        if !summary.is_empty() {
            out.push_str(&format!("   {}\n", summary));
        }
    }
    out
}
