//! YouTube channel Atom feed client.

use feed_rs::model::Feed;
use reqwest::Client;

use crate::models::{content_id, ContentItem, ContentType};

const FEED_URL: &str = "https://www.youtube.com/feeds/videos.xml";

/// Fetch the latest uploads of a channel (the feed carries ~15 entries).
pub async fn fetch(client: &Client, channel_id: &str) -> anyhow::Result<Vec<ContentItem>> {
    let url = format!(
        "{}?channel_id={}",
        FEED_URL,
        urlencoding::encode(channel_id)
    );

    tracing::debug!("Fetching YouTube feed: {}", url);
    let bytes = client.get(&url).send().await?.error_for_status()?.bytes().await?;
    let feed = feed_rs::parser::parse(bytes.as_ref())?;
    Ok(items_from_feed(&feed))
}

/// Map feed entries to library videos. The channel name comes from the feed
/// title and is shared by every entry.
pub fn items_from_feed(feed: &Feed) -> Vec<ContentItem> {
    let channel = feed
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    feed.entries
        .iter()
        .filter_map(|entry| {
            let title = entry.title.as_ref()?.content.trim().to_string();
            let url = entry.links.first()?.href.clone();
            if title.is_empty() || url.is_empty() {
                return None;
            }

            let summary = entry
                .media
                .first()
                .and_then(|m| m.description.as_ref())
                .map(|d| d.content.trim().to_string())
                .or_else(|| entry.summary.as_ref().map(|s| s.content.trim().to_string()))
                .unwrap_or_default();

            let mut item = ContentItem::new(
                content_id(&url),
                ContentType::Video,
                title,
                summary,
                url,
            );
            if !channel.is_empty() {
                item = item.byline(channel.clone());
            }
            if let Some(published) = entry.published.or(entry.updated) {
                item = item.published_at(published.date_naive());
            }
            Some(item)
        })
        .collect()
}
