//! Domain models for the content library.

pub mod search;

pub use search::{Pagination, SearchItem, SearchQuery, SearchResults, SortOrder, PAGE_SIZE};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The three kinds of content the library holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Paper,
    Video,
    Nasa,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Paper => "paper",
            ContentType::Video => "video",
            ContentType::Nasa => "nasa",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "paper" => Some(ContentType::Paper),
            "video" => Some(ContentType::Video),
            "nasa" => Some(ContentType::Nasa),
            _ => None,
        }
    }
}

/// Content-type filter for search requests. `All` spans every table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    #[default]
    All,
    Papers,
    Videos,
    Nasa,
}

impl ContentFilter {
    /// Parse a `type` query parameter. Unknown values mean `All`.
    pub fn from_param(s: &str) -> Self {
        match s {
            "papers" => ContentFilter::Papers,
            "videos" => ContentFilter::Videos,
            "nasa" => ContentFilter::Nasa,
            _ => ContentFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFilter::All => "all",
            ContentFilter::Papers => "papers",
            ContentFilter::Videos => "videos",
            ContentFilter::Nasa => "nasa",
        }
    }

    /// The single content type this filter selects, if it is not `All`.
    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            ContentFilter::All => None,
            ContentFilter::Papers => Some(ContentType::Paper),
            ContentFilter::Videos => Some(ContentType::Video),
            ContentFilter::Nasa => Some(ContentType::Nasa),
        }
    }

    /// Whether items of `ty` pass this filter.
    pub fn matches(&self, ty: ContentType) -> bool {
        self.content_type().map(|t| t == ty).unwrap_or(true)
    }
}

/// A single library item, regardless of which table it lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable id, derived from the item's canonical URL.
    pub id: String,
    pub content_type: ContentType,
    pub title: String,
    /// Abstract, description, or caption depending on the content type.
    pub summary: String,
    pub url: String,
    /// Authors for papers, channel name for videos, media type for NASA items.
    pub byline: Option<String>,
    /// arXiv category for papers; unused for other types.
    pub category: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Build an item with a fresh `created_at` timestamp.
    pub fn new(
        id: impl Into<String>,
        content_type: ContentType,
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type,
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
            byline: None,
            category: None,
            published_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = Some(byline.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn published_at(mut self, date: NaiveDate) -> Self {
        self.published_at = Some(date);
        self
    }
}

/// Derive a stable item id from a canonical URL.
///
/// The same URL always maps to the same id, which is what makes repeated
/// ingestion runs idempotent.
pub fn content_id(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(url.as_bytes());
    hex::encode(&digest[..12])
}

/// Aggregate library counts, shown on the dashboard and `/api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryStats {
    pub papers: u64,
    pub videos: u64,
    pub nasa: u64,
    pub total: u64,
}

impl LibraryStats {
    /// `total` is always the sum of the per-type counts.
    pub fn new(papers: u64, videos: u64, nasa: u64) -> Self {
        Self {
            papers,
            videos,
            nasa,
            total: papers + videos + nasa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_total_is_sum() {
        let stats = LibraryStats::new(3, 2, 5);
        assert_eq!(stats.total, 10);
        assert_eq!(LibraryStats::default().total, 0);
    }

    #[test]
    fn filter_matches_types() {
        assert!(ContentFilter::All.matches(ContentType::Video));
        assert!(ContentFilter::Papers.matches(ContentType::Paper));
        assert!(!ContentFilter::Papers.matches(ContentType::Nasa));
        assert_eq!(ContentFilter::from_param("videos"), ContentFilter::Videos);
        assert_eq!(ContentFilter::from_param("bogus"), ContentFilter::All);
    }

    #[test]
    fn content_ids_are_stable() {
        let a = content_id("https://arxiv.org/abs/2401.00001");
        let b = content_id("https://arxiv.org/abs/2401.00001");
        let c = content_id("https://arxiv.org/abs/2401.00002");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 24);
    }
}
