use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{GazetteError, Result};
use crate::domain::Entry;

/// Only the first entries of each feed, in document order, are kept.
pub const MAX_ENTRIES_PER_FEED: usize = 5;

/// Converts raw RSS/Atom documents into domain entries: caps the entry
/// count, reduces HTML-bearing descriptions to plain text, and pulls media
/// URLs out of entry-level media metadata.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Entry>> {
        let feed = parser::parse(body).map_err(|e| GazetteError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .take(MAX_ENTRIES_PER_FEED)
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_default();

                let description = entry
                    .summary
                    .map(|s| html_to_text(&s.content))
                    .unwrap_or_default();

                let link = entry.links.first().map(|l| l.href.clone());

                let media_urls: Vec<String> = entry
                    .media
                    .iter()
                    .flat_map(|media| {
                        media
                            .content
                            .iter()
                            .filter_map(|c| c.url.as_ref().map(|u| u.to_string()))
                            .chain(media.thumbnails.iter().map(|t| t.image.uri.clone()))
                    })
                    .collect();

                Entry {
                    title,
                    description,
                    link,
                    media_urls,
                }
            })
            .collect();

        Ok(entries)
    }
}

/// Reduce an HTML fragment to plain text: drop tags, decode entities,
/// collapse runs of whitespace.
pub fn html_to_text(html: &str) -> String {
    let mut stripped = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        stripped.push(' ');
                        last_was_space = true;
                    }
                } else {
                    stripped.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    decode_html_entities(stripped.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Test Feed</title>
    <item>
      <title>First &amp; Foremost</title>
      <link>https://example.com/item1</link>
      <description>&lt;p&gt;Some &lt;b&gt;bold&lt;/b&gt;   text&lt;/p&gt;</description>
      <media:content url="https://example.com/image1.jpg" type="image/jpeg"/>
    </item>
    <item>
      <title>Second</title>
      <link>https://example.com/item2</link>
      <description>Plain text</description>
    </item>
  </channel>
</rss>"#;

    fn rss_with_items(count: usize) -> String {
        let items: String = (0..count)
            .map(|i| {
                format!(
                    "<item><title>Item {i}</title><link>https://example.com/{i}</link>\
                     <description>Body {i}</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Big</title>{items}</channel></rss>"#
        )
    }

    #[test]
    fn test_normalize_extracts_fields() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "First & Foremost");
        assert_eq!(entries[0].description, "Some bold text");
        assert_eq!(entries[0].link.as_deref(), Some("https://example.com/item1"));
    }

    #[test]
    fn test_normalize_extracts_media_urls() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries[0].media_urls, vec!["https://example.com/image1.jpg"]);
        assert!(entries[1].media_urls.is_empty());
    }

    #[test]
    fn test_normalize_caps_entry_count() {
        let doc = rss_with_items(9);
        let entries = Normalizer::new().normalize(doc.as_bytes()).unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES_PER_FEED);
        assert_eq!(entries[0].title, "Item 0");
        assert_eq!(entries[4].title, "Item 4");
    }

    #[test]
    fn test_normalize_rejects_malformed_documents() {
        let result = Normalizer::new().normalize(b"this is not xml at all");
        assert!(matches!(result, Err(GazetteError::FeedParse(_))));
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        assert_eq!(html_to_text("<p>a\n\n  b</p>"), "a b");
        assert_eq!(html_to_text("no tags"), "no tags");
        assert_eq!(html_to_text("&lt;kept&gt;"), "<kept>");
    }
}
