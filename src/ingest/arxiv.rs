//! arXiv Atom feed client.

use feed_rs::model::Feed;
use reqwest::Client;

use crate::models::{content_id, ContentItem, ContentType};

const API_URL: &str = "https://export.arxiv.org/api/query";

/// Fetch the most recent submissions in `category` (e.g. "astro-ph").
pub async fn fetch(
    client: &Client,
    category: &str,
    max_results: u32,
) -> anyhow::Result<Vec<ContentItem>> {
    let url = format!(
        "{}?search_query=cat:{}*&start=0&max_results={}&sortBy=submittedDate&sortOrder=descending",
        API_URL,
        urlencoding::encode(category),
        max_results
    );

    tracing::debug!("Fetching arXiv feed: {}", url);
    let bytes = client.get(&url).send().await?.error_for_status()?.bytes().await?;
    let feed = feed_rs::parser::parse(bytes.as_ref())?;
    Ok(items_from_feed(&feed, category))
}

/// Map Atom entries to library papers. Entries without a title are dropped.
pub fn items_from_feed(feed: &Feed, category: &str) -> Vec<ContentItem> {
    feed.entries
        .iter()
        .filter_map(|entry| {
            let title = collapse_whitespace(&entry.title.as_ref()?.content);
            if title.is_empty() {
                return None;
            }

            // Prefer the alternate (abstract page) link; the entry id is the
            // same URL on arXiv and serves as the fallback.
            let url = entry
                .links
                .iter()
                .find(|l| l.rel.as_deref() == Some("alternate"))
                .map(|l| l.href.clone())
                .unwrap_or_else(|| entry.id.clone());

            let summary = entry
                .summary
                .as_ref()
                .map(|s| collapse_whitespace(&s.content))
                .unwrap_or_default();

            let authors = entry
                .authors
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");

            let mut item = ContentItem::new(
                content_id(&url),
                ContentType::Paper,
                title,
                summary,
                url,
            )
            .category(category);
            if !authors.is_empty() {
                item = item.byline(authors);
            }
            if let Some(published) = entry.published.or(entry.updated) {
                item = item.published_at(published.date_naive());
            }
            Some(item)
        })
        .collect()
}

/// arXiv abstracts arrive with hard line wraps; flatten them.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <id>http://arxiv.org/api/example</id>
  <updated>2024-06-01T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2406.00001v1</id>
    <updated>2024-06-01T00:00:00Z</updated>
    <published>2024-05-30T12:00:00Z</published>
    <title>Accretion Disks around
  Stellar-Mass Black Holes</title>
    <summary>We study accretion
  disks in detail.</summary>
    <author><name>A. Astronomer</name></author>
    <author><name>B. Cosmologist</name></author>
    <link href="http://arxiv.org/abs/2406.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2406.00001v1" rel="related" type="application/pdf"/>
  </entry>
</feed>"#;

    #[test]
    fn parses_arxiv_entries() {
        let feed = feed_rs::parser::parse(SAMPLE.as_bytes()).unwrap();
        let items = items_from_feed(&feed, "astro-ph");

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.content_type, ContentType::Paper);
        assert_eq!(item.title, "Accretion Disks around Stellar-Mass Black Holes");
        assert_eq!(item.url, "http://arxiv.org/abs/2406.00001v1");
        assert_eq!(item.summary, "We study accretion disks in detail.");
        assert_eq!(
            item.byline.as_deref(),
            Some("A. Astronomer, B. Cosmologist")
        );
        assert_eq!(item.category.as_deref(), Some("astro-ph"));
        assert_eq!(
            item.published_at.unwrap().to_string(),
            "2024-05-30"
        );
        // Stable id derived from the abstract URL
        assert_eq!(item.id, content_id("http://arxiv.org/abs/2406.00001v1"));
    }

    #[test]
    fn collapse_flattens_hard_wraps() {
        assert_eq!(collapse_whitespace("a\n  b\tc"), "a b c");
    }
}
