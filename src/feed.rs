//! RSS item extraction.
//!
//! Turns the raw bytes of an RSS document into an ordered list of
//! [`Article`]s. The document is streamed with `quick-xml`; every element
//! named `item` becomes one record, built from its direct `link`, `title`,
//! `description`, `source` and `pubDate` children.
//!
//! Extraction is all-or-nothing: a single item with a missing field or an
//! unparsable date fails the whole document.

use crate::error::FeedError;
use crate::models::{Article, PublishedDate};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;
use regex::Regex;

/// Child elements read from every item, in [`Article`] field order.
const ITEM_FIELDS: [&str; 5] = ["link", "title", "description", "source", "pubDate"];

/// `<Wkd>, <DD> <Mon> <YYYY> <HH:MM:SS> <TZ>`, e.g. `Mon, 02 Jan 2023 15:04:05 GMT`.
static PUB_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun), (\d{1,2} [a-z]{3} \d{4} \d{1,2}:\d{1,2}:\d{1,2}) ([a-z]{1,5})$",
    )
    .expect("pubDate pattern is valid")
});

/// Layout of the date/time portion captured by [`PUB_DATE_RE`].
const PUB_DATE_LAYOUT: &str = "%d %b %Y %H:%M:%S";

/// Extract every item of an RSS document, in document order.
///
/// # Errors
///
/// - [`FeedError::Xml`] / [`FeedError::Decode`] if the document is not well-formed
/// - [`FeedError::Truncated`] if the document ends with elements still open
/// - [`FeedError::MissingField`] if any item lacks one of the required children
/// - [`FeedError::InvalidDate`] if any `pubDate` does not match the RSS date layout
///
/// A document without items is not an error and yields an empty list.
pub fn extract(feed_bytes: &[u8]) -> Result<Vec<Article>, FeedError> {
    let mut reader = Reader::from_reader(feed_bytes);
    let mut buf = Vec::new();
    let mut articles = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<PendingItem> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                match current.as_mut() {
                    Some(item) => item.open_child(name.as_ref(), depth),
                    None if name.as_ref() == b"item" => current = Some(PendingItem::new(depth)),
                    None => {}
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match current.as_mut() {
                    Some(item) => item.empty_child(name.as_ref(), depth + 1),
                    // `<item/>` carries no fields at all
                    None if name.as_ref() == b"item" => {
                        articles.push(PendingItem::new(depth + 1).finish(articles.len())?);
                    }
                    None => {}
                }
            }
            Event::End(_) => {
                let closes_item = current.as_ref().is_some_and(|item| item.depth == depth);
                if closes_item {
                    if let Some(item) = current.take() {
                        articles.push(item.finish(articles.len())?);
                    }
                } else if let Some(item) = current.as_mut() {
                    item.close_child(depth);
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) => {
                if let Some(item) = current.as_mut() {
                    let text = t.decode().map_err(|e| FeedError::Decode(e.to_string()))?;
                    item.push_text(&text);
                }
            }
            Event::CData(c) => {
                if let Some(item) = current.as_mut() {
                    let text = c.decode().map_err(|e| FeedError::Decode(e.to_string()))?;
                    item.push_text(&text);
                }
            }
            Event::GeneralRef(r) => {
                if let Some(item) = current.as_mut() {
                    item.push_text(&resolve_reference(&r)?);
                }
            }
            Event::Eof => {
                if current.is_some() || depth != 0 {
                    return Err(FeedError::Truncated {
                        open_elements: depth,
                        items: articles.len(),
                    });
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

/// Parse an RSS `pubDate` such as `Mon, 02 Jan 2023 15:04:05 GMT`.
///
/// The weekday must be a valid abbreviation but is not checked against the
/// calendar date. The timezone token is kept as written.
pub fn parse_pub_date(value: &str) -> Result<PublishedDate, FeedError> {
    let invalid = || FeedError::InvalidDate {
        value: value.to_string(),
    };

    let caps = PUB_DATE_RE.captures(value).ok_or_else(invalid)?;
    let datetime =
        NaiveDateTime::parse_from_str(&caps[1], PUB_DATE_LAYOUT).map_err(|_| invalid())?;

    Ok(PublishedDate::new(datetime, &caps[2]))
}

/// Expand `&amp;`-style and `&#38;`-style references to their text.
///
/// Unknown named entities are kept literally.
fn resolve_reference(r: &BytesRef<'_>) -> Result<String, FeedError> {
    if let Some(ch) = r
        .resolve_char_ref()
        .map_err(|e| FeedError::Decode(e.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = r.decode().map_err(|e| FeedError::Decode(e.to_string()))?;
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => format!("&{name};"),
    })
}

/// Fields collected so far for the `item` element currently open.
struct PendingItem {
    /// Element depth of the `<item>` start tag.
    depth: usize,
    values: [Option<String>; 5],
    /// Field index and depth of the child whose text is being collected.
    capturing: Option<(usize, usize)>,
}

impl PendingItem {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            values: Default::default(),
            capturing: None,
        }
    }

    /// Index into [`ITEM_FIELDS`] if `name` is a not-yet-seen direct child field.
    fn field_slot(&self, name: &[u8], child_depth: usize) -> Option<usize> {
        if self.capturing.is_some() || child_depth != self.depth + 1 {
            return None;
        }
        ITEM_FIELDS
            .iter()
            .position(|f| f.as_bytes() == name)
            .filter(|&idx| self.values[idx].is_none())
    }

    fn open_child(&mut self, name: &[u8], child_depth: usize) {
        if let Some(idx) = self.field_slot(name, child_depth) {
            self.values[idx] = Some(String::new());
            self.capturing = Some((idx, child_depth));
        }
    }

    fn empty_child(&mut self, name: &[u8], child_depth: usize) {
        if let Some(idx) = self.field_slot(name, child_depth) {
            self.values[idx] = Some(String::new());
        }
    }

    fn close_child(&mut self, closing_depth: usize) {
        if matches!(self.capturing, Some((_, d)) if d == closing_depth) {
            self.capturing = None;
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some((idx, _)) = self.capturing {
            if let Some(value) = self.values[idx].as_mut() {
                value.push_str(text);
            }
        }
    }

    /// Build the article; `index` is the item's position for error reporting.
    fn finish(self, index: usize) -> Result<Article, FeedError> {
        let [link, title, description, source, pub_date] = self.values;
        let require = |value: Option<String>, field: &'static str| {
            value.ok_or(FeedError::MissingField { item: index, field })
        };

        let link = require(link, "link")?;
        let title = require(title, "title")?;
        let description = require(description, "description")?;
        let publisher = require(source, "source")?;
        let published_date = parse_pub_date(&require(pub_date, "pubDate")?)?;

        Ok(Article {
            link,
            title,
            description,
            publisher,
            published_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn item(link: &str, title: &str, date: &str) -> String {
        format!(
            "<item><link>{link}</link><title>{title}</title><description>D</description>\
             <source url=\"https://pub.example\">Pub</source><pubDate>{date}</pubDate></item>"
        )
    }

    fn feed(items: &[String]) -> Vec<u8> {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <rss version=\"2.0\"><channel><title>Search</title>{}</channel></rss>",
            items.concat()
        )
        .into_bytes()
    }

    #[test]
    fn test_single_item() {
        let doc = "<item><link>http://x/a</link><title>T</title><description>D</description>\
                   <source>Pub</source><pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>";

        let articles = extract(doc.as_bytes()).unwrap();
        assert_eq!(articles.len(), 1);

        let a = &articles[0];
        assert_eq!(a.link, "http://x/a");
        assert_eq!(a.title, "T");
        assert_eq!(a.description, "D");
        assert_eq!(a.publisher, "Pub");
        assert_eq!(a.published_date.datetime.to_string(), "2023-01-02 15:04:05");
        assert_eq!(a.published_date.timezone, "GMT");
    }

    #[test]
    fn test_document_order_preserved() {
        let items: Vec<String> = (0..5)
            .map(|i| item(&format!("http://x/{i}"), &format!("T{i}"), "Tue, 03 Jan 2023 08:00:00 GMT"))
            .collect();

        let articles = extract(&feed(&items)).unwrap();
        let links: Vec<&str> = articles.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, ["http://x/0", "http://x/1", "http://x/2", "http://x/3", "http://x/4"]);
    }

    #[test]
    fn test_channel_title_is_not_an_item_field() {
        let articles = extract(&feed(&[item("http://x/a", "Item", "Mon, 02 Jan 2023 15:04:05 GMT")])).unwrap();
        assert_eq!(articles[0].title, "Item");
    }

    #[test]
    fn test_empty_feed() {
        let articles = extract(&feed(&[])).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_missing_field_fails_whole_feed() {
        let broken = "<item><link>http://x/b</link><title>T</title><description>D</description>\
                      <pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>"
            .to_string();
        let good = item("http://x/a", "T", "Mon, 02 Jan 2023 15:04:05 GMT");

        let err = extract(&feed(&[good, broken])).unwrap_err();
        assert!(matches!(
            err,
            FeedError::MissingField { item: 1, field: "source" }
        ));
    }

    #[test]
    fn test_self_closing_item_is_missing_fields() {
        let err = extract(b"<rss><channel><item/></channel></rss>").unwrap_err();
        assert!(matches!(err, FeedError::MissingField { item: 0, field: "link" }));
    }

    #[test]
    fn test_invalid_date_fails_whole_feed() {
        let items = [
            item("http://x/a", "T", "Mon, 02 Jan 2023 15:04:05 GMT"),
            item("http://x/b", "T", "2023-01-02T15:04:05Z"),
        ];
        let err = extract(&feed(&items)).unwrap_err();
        assert!(matches!(err, FeedError::InvalidDate { ref value } if value == "2023-01-02T15:04:05Z"));
    }

    #[test]
    fn test_entities_and_cdata_are_decoded() {
        let doc = "<item><link>http://x/a?b=1&amp;c=2</link>\
                   <title>Tom &amp; Jerry &#8211; News</title>\
                   <description>&lt;a href=\"http://x\"&gt;Story&lt;/a&gt;</description>\
                   <source><![CDATA[Pub <Daily>]]></source>\
                   <pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>";

        let a = &extract(doc.as_bytes()).unwrap()[0];
        assert_eq!(a.link, "http://x/a?b=1&c=2");
        assert_eq!(a.title, "Tom & Jerry \u{2013} News");
        assert_eq!(a.description, "<a href=\"http://x\">Story</a>");
        assert_eq!(a.publisher, "Pub <Daily>");
    }

    #[test]
    fn test_text_kept_verbatim() {
        let doc = "<item><link>http://x/a</link><title>  Padded title  </title><description/>\
                   <source>Pub</source><pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>";

        let a = &extract(doc.as_bytes()).unwrap()[0];
        assert_eq!(a.title, "  Padded title  ");
        assert_eq!(a.description, "");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let doc = "<item><link>http://x/first</link><link>http://x/second</link><title>T</title>\
                   <description>D</description><source>Pub</source>\
                   <pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>";

        let a = &extract(doc.as_bytes()).unwrap()[0];
        assert_eq!(a.link, "http://x/first");
    }

    #[test]
    fn test_nested_descendants_not_taken_as_fields() {
        let doc = "<item><link>http://x/a</link><title>T</title><description>D</description>\
                   <media><title>Nested</title></media><source>Pub</source>\
                   <pubDate>Mon, 02 Jan 2023 15:04:05 GMT</pubDate></item>";

        let a = &extract(doc.as_bytes()).unwrap()[0];
        assert_eq!(a.title, "T");
    }

    #[test]
    fn test_malformed_xml() {
        let err = extract(b"<rss><channel><item><link>x</title></item></channel></rss>").unwrap_err();
        assert!(matches!(err, FeedError::Xml(_)));
    }

    #[test]
    fn test_truncated_feed_fails() {
        let mut doc = feed(&[item("http://x/a", "T", "Mon, 02 Jan 2023 15:04:05 GMT")]);
        doc.truncate(doc.len() - "</channel></rss>".len());
        doc.extend_from_slice(b"<item><link>http://x/b</link>");

        let err = extract(&doc).unwrap_err();
        assert!(matches!(
            err,
            FeedError::Truncated { open_elements: 3, items: 1 }
        ));
    }

    #[test]
    fn test_unclosed_channel_fails() {
        let mut doc = feed(&[item("http://x/a", "T", "Mon, 02 Jan 2023 15:04:05 GMT")]);
        doc.truncate(doc.len() - "</rss>".len());

        let err = extract(&doc).unwrap_err();
        assert!(matches!(err, FeedError::Truncated { open_elements: 1, .. }));
    }

    #[test]
    fn test_parse_pub_date_fields() {
        let date = parse_pub_date("Sun, 19 Oct 2025 07:30:59 GMT").unwrap();
        assert_eq!(date.datetime.year(), 2025);
        assert_eq!(date.datetime.month(), 10);
        assert_eq!(date.datetime.day(), 19);
        assert_eq!(date.datetime.hour(), 7);
        assert_eq!(date.datetime.minute(), 30);
        assert_eq!(date.datetime.second(), 59);
        assert_eq!(date.timezone, "GMT");
    }

    #[test]
    fn test_parse_pub_date_single_digit_day() {
        let date = parse_pub_date("Mon, 2 Jan 2023 15:04:05 GMT").unwrap();
        assert_eq!(date.datetime.day(), 2);
    }

    #[test]
    fn test_parse_pub_date_weekday_not_cross_checked() {
        // 2023-01-02 was a Monday
        assert!(parse_pub_date("Fri, 02 Jan 2023 15:04:05 GMT").is_ok());
    }

    #[test]
    fn test_parse_pub_date_rejects_other_layouts() {
        for bad in [
            "",
            "02 Jan 2023 15:04:05 GMT",
            "Mon, 02 Jan 2023 15:04:05",
            "Mon, 02 Jan 2023 15:04:05 +0000",
            "Xyz, 02 Jan 2023 15:04:05 GMT",
            "Mon, 02 Foo 2023 15:04:05 GMT",
            "Mon, 32 Jan 2023 15:04:05 GMT",
            "Mon, 02 Jan 2023 25:04:05 GMT",
            "Mon,  02 Jan 2023 15:04:05 GMT",
        ] {
            assert!(
                matches!(parse_pub_date(bad), Err(FeedError::InvalidDate { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
