//! NASA Images API client.
//!
//! The API wraps results in a `collection.items[]` envelope where each item
//! carries a `data[]` metadata array; only the first data element matters.

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::models::{content_id, ContentItem, ContentType};

const API_URL: &str = "https://images-api.nasa.gov/search";

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    pub collection: Collection,
}

#[derive(Debug, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionItem {
    #[serde(default)]
    pub data: Vec<ItemData>,
}

#[derive(Debug, Deserialize)]
pub struct ItemData {
    pub nasa_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// Search the NASA image library for `query`.
pub async fn fetch(client: &Client, query: &str) -> anyhow::Result<Vec<ContentItem>> {
    let url = format!(
        "{}?q={}&media_type=image,video",
        API_URL,
        urlencoding::encode(query)
    );

    tracing::debug!("Fetching NASA images: {}", url);
    let envelope: SearchEnvelope = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(items_from_envelope(&envelope))
}

/// Map API items to library entries. The detail URL on images.nasa.gov is
/// reconstructed from the nasa_id, which is also what the id hash keys on.
pub fn items_from_envelope(envelope: &SearchEnvelope) -> Vec<ContentItem> {
    envelope
        .collection
        .items
        .iter()
        .filter_map(|entry| {
            let data = entry.data.first()?;
            if data.title.trim().is_empty() {
                return None;
            }

            let url = format!(
                "https://images.nasa.gov/details/{}",
                urlencoding::encode(&data.nasa_id)
            );

            let mut item = ContentItem::new(
                content_id(&url),
                ContentType::Nasa,
                data.title.trim(),
                data.description.as_deref().unwrap_or("").trim(),
                url,
            );
            if let Some(ref media_type) = data.media_type {
                item = item.byline(media_type.clone());
            }
            if let Some(date) = data
                .date_created
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            {
                item = item.published_at(date.date_naive());
            }
            Some(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "collection": {
        "version": "1.0",
        "href": "https://images-api.nasa.gov/search?q=crab+nebula",
        "items": [
          {
            "href": "https://images-assets.nasa.gov/image/PIA03606/collection.json",
            "data": [
              {
                "nasa_id": "PIA03606",
                "title": "Crab Nebula Mosaic",
                "description": "A mosaic image of the Crab Nebula.",
                "media_type": "image",
                "date_created": "2005-12-01T00:00:00Z"
              }
            ],
            "links": [
              { "href": "https://images-assets.nasa.gov/image/PIA03606/PIA03606~thumb.jpg", "rel": "preview" }
            ]
          },
          { "data": [], "links": [] }
        ]
      }
    }"#;

    #[test]
    fn parses_api_items() {
        let envelope: SearchEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let items = items_from_envelope(&envelope);

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.content_type, ContentType::Nasa);
        assert_eq!(item.title, "Crab Nebula Mosaic");
        assert_eq!(item.url, "https://images.nasa.gov/details/PIA03606");
        assert_eq!(item.byline.as_deref(), Some("image"));
        assert_eq!(item.published_at.unwrap().to_string(), "2005-12-01");
    }

    #[test]
    fn skips_items_without_data() {
        let envelope = SearchEnvelope {
            collection: Collection { items: vec![] },
        };
        assert!(items_from_envelope(&envelope).is_empty());
    }
}
