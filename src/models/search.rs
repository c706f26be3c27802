//! Search request and response models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ContentFilter, ContentItem, ContentType};
use crate::locale::Locale;

/// Results per page. Fixed; the UI never asks for another size.
pub const PAGE_SIZE: u32 = 20;

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first by publication date.
    #[default]
    Date,
    /// Title, ascending.
    Title,
}

impl SortOrder {
    pub fn from_param(s: &str) -> Self {
        match s {
            "title" => SortOrder::Title,
            _ => SortOrder::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Date => "date",
            SortOrder::Title => "title",
        }
    }
}

/// One search request, created per user interaction and never persisted.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Free-text query, trimmed on construction.
    pub text: String,
    pub filter: ContentFilter,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub sort: SortOrder,
    /// 1-based page number.
    pub page: u32,
    pub locale: Locale,
}

impl SearchQuery {
    /// Create a query for `text`. The text is trimmed; page defaults to 1.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            filter: ContentFilter::All,
            date_from: None,
            date_to: None,
            sort: SortOrder::Date,
            page: 1,
            locale: Locale::En,
        }
    }

    pub fn filter(mut self, filter: ContentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the page, clamped to at least 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// A query with no text never reaches the database.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset of the first result on this page.
    pub fn offset(&self) -> u32 {
        (self.page - 1) * PAGE_SIZE
    }
}

/// Pager metadata for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Compute pager metadata for `page` out of `total` results.
    pub fn new(page: u32, total: u64) -> Self {
        let total_pages = (total.div_ceil(PAGE_SIZE as u64)).max(1) as u32;
        let page = page.clamp(1, total_pages);
        Self {
            page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One result item as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub snippet: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    pub low_relevance: bool,
}

impl SearchItem {
    /// Build a wire item from a library item. `low_relevance` marks items
    /// returned only because no exact match existed.
    pub fn from_item(item: &ContentItem, low_relevance: bool) -> Self {
        Self {
            id: item.id.clone(),
            content_type: item.content_type,
            title: item.title.clone(),
            snippet: item.summary.clone(),
            url: item.url.clone(),
            published_date: item.published_at,
            low_relevance,
        }
    }
}

/// The `/api/search` response envelope, partitioned by content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub papers: Vec<SearchItem>,
    pub videos: Vec<SearchItem>,
    pub nasa: Vec<SearchItem>,
    pub total: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub showing_related: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResults {
    /// An empty result set for `query`.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            papers: Vec::new(),
            videos: Vec::new(),
            nasa: Vec::new(),
            total: 0,
            showing_related: false,
            pagination: None,
            error: None,
        }
    }

    /// The degraded envelope returned with HTTP 500 on internal failure.
    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(query)
        }
    }

    /// Partition `items` into the three type buckets, preserving arrival
    /// order within each bucket.
    pub fn partition(
        query: impl Into<String>,
        items: &[ContentItem],
        total: u64,
        low_relevance: bool,
    ) -> Self {
        let mut results = Self::empty(query);
        results.total = total;
        results.showing_related = low_relevance;
        for item in items {
            let wire = SearchItem::from_item(item, low_relevance);
            match item.content_type {
                ContentType::Paper => results.papers.push(wire),
                ContentType::Video => results.videos.push(wire),
                ContentType::Nasa => results.nasa.push(wire),
            }
        }
        results
    }

    /// Number of items actually carried in this envelope.
    pub fn item_count(&self) -> usize {
        self.papers.len() + self.videos.len() + self.nasa.len()
    }
}
