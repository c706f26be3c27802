//! Feed ingestion: pulls external content into the library.
//!
//! Three sources feed the portal: arXiv Atom for papers, a YouTube channel
//! Atom feed for videos, and the NASA Images API for NASA media. Items get
//! stable URL-derived ids, so re-running ingestion refreshes rather than
//! duplicates.

pub mod arxiv;
pub mod nasa;
pub mod youtube;

use std::time::Duration;

use reqwest::Client;

use crate::config::Settings;
use crate::models::ContentItem;
use crate::repository::ContentRepository;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    pub fetched: usize,
    pub stored: usize,
}

/// Fetches external feeds and upserts their items.
#[derive(Clone)]
pub struct IngestService {
    client: Client,
    repo: ContentRepository,
    arxiv_category: String,
    youtube_channel: Option<String>,
}

impl IngestService {
    pub fn new(settings: &Settings, repo: ContentRepository) -> Self {
        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.request_timeout))
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            repo,
            arxiv_category: settings.arxiv_category.clone(),
            youtube_channel: settings.youtube_channel.clone(),
        }
    }

    /// Ingest recent arXiv papers for the configured category.
    pub async fn ingest_papers(&self, max_results: u32) -> anyhow::Result<IngestReport> {
        let items = arxiv::fetch(&self.client, &self.arxiv_category, max_results).await?;
        self.store(items).await
    }

    /// Ingest the configured YouTube channel's feed. A portal without a
    /// configured channel simply stores nothing.
    pub async fn ingest_videos(&self) -> anyhow::Result<IngestReport> {
        let Some(ref channel) = self.youtube_channel else {
            tracing::info!("No youtube_channel configured, skipping video ingestion");
            return Ok(IngestReport::default());
        };
        let items = youtube::fetch(&self.client, channel).await?;
        self.store(items).await
    }

    /// Ingest NASA Images API results for `query`.
    pub async fn ingest_nasa(&self, query: &str) -> anyhow::Result<IngestReport> {
        let items = nasa::fetch(&self.client, query).await?;
        self.store(items).await
    }

    async fn store(&self, items: Vec<ContentItem>) -> anyhow::Result<IngestReport> {
        let mut report = IngestReport {
            fetched: items.len(),
            stored: 0,
        };
        for item in &items {
            match self.repo.upsert(item).await {
                Ok(()) => report.stored += 1,
                Err(e) => {
                    tracing::warn!("Failed to store {} ({}): {}", item.id, item.title, e)
                }
            }
        }
        tracing::info!("Ingested {}/{} items", report.stored, report.fetched);
        Ok(report)
    }
}
