//! Content repository: counts, search, and upserts over the three tables.
//!
//! Search runs the same text/date filters against every table the filter
//! includes, then merges the per-table rows in memory. Each table is only
//! asked for the first `offset + limit` rows, so a page stays bounded no
//! matter how large the library gets.

use diesel::prelude::*;

use super::pool::{run_blocking, DieselError, SqlitePool};
use super::records::{
    NasaItemRecord, NewNasaItem, NewPaper, NewVideo, PaperRecord, VideoRecord,
};
use super::{parse_date_opt, parse_datetime};
use crate::models::{ContentFilter, ContentItem, ContentType, LibraryStats, SearchQuery, SortOrder, PAGE_SIZE};
use crate::schema::{nasa_items, papers, videos};

impl From<PaperRecord> for ContentItem {
    fn from(record: PaperRecord) -> Self {
        ContentItem {
            id: record.id,
            content_type: ContentType::Paper,
            title: record.title,
            summary: record.summary,
            url: record.url,
            byline: Some(record.authors).filter(|s| !s.is_empty()),
            category: Some(record.category).filter(|s| !s.is_empty()),
            published_at: parse_date_opt(record.published_at),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

impl From<VideoRecord> for ContentItem {
    fn from(record: VideoRecord) -> Self {
        ContentItem {
            id: record.id,
            content_type: ContentType::Video,
            title: record.title,
            summary: record.summary,
            url: record.url,
            byline: Some(record.channel).filter(|s| !s.is_empty()),
            category: None,
            published_at: parse_date_opt(record.published_at),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

impl From<NasaItemRecord> for ContentItem {
    fn from(record: NasaItemRecord) -> Self {
        ContentItem {
            id: record.id,
            content_type: ContentType::Nasa,
            title: record.title,
            summary: record.summary,
            url: record.url,
            byline: Some(record.media_type).filter(|s| !s.is_empty()),
            category: None,
            published_at: parse_date_opt(record.published_at),
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Repository over the three content tables.
#[derive(Clone)]
pub struct ContentRepository {
    pool: SqlitePool,
}

impl ContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Aggregate per-type counts. `total` is the sum by construction.
    pub async fn stats(&self) -> Result<LibraryStats, DieselError> {
        let pool = self.pool.clone();

        run_blocking(pool, |conn| {
            use diesel::dsl::count_star;
            let paper_count: i64 = papers::table.select(count_star()).first(conn)?;
            let video_count: i64 = videos::table.select(count_star()).first(conn)?;
            let nasa_count: i64 = nasa_items::table.select(count_star()).first(conn)?;
            Ok(LibraryStats::new(
                paper_count as u64,
                video_count as u64,
                nasa_count as u64,
            ))
        })
        .await
    }

    /// Run a text search and return one page of merged results plus the
    /// total match count across all included tables.
    pub async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<ContentItem>, u64), DieselError> {
        let pattern = like_pattern(&query.text);
        let filter = query.filter;
        let from = query.date_from.map(|d| d.format("%Y-%m-%d").to_string());
        let to = query.date_to.map(|d| d.format("%Y-%m-%d").to_string());
        let sort = query.sort;
        let offset = query.offset() as usize;
        // Enough rows per table to fill this page after the merge
        let take = (offset + PAGE_SIZE as usize) as i64;
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let mut items: Vec<ContentItem> = Vec::new();
            let mut total: u64 = 0;

            if filter.matches(ContentType::Paper) {
                total += count_papers(conn, &pattern, &from, &to)?;
                items.extend(
                    load_papers(conn, &pattern, &from, &to, sort, take)?
                        .into_iter()
                        .map(ContentItem::from),
                );
            }
            if filter.matches(ContentType::Video) {
                total += count_videos(conn, &pattern, &from, &to)?;
                items.extend(
                    load_videos(conn, &pattern, &from, &to, sort, take)?
                        .into_iter()
                        .map(ContentItem::from),
                );
            }
            if filter.matches(ContentType::Nasa) {
                total += count_nasa(conn, &pattern, &from, &to)?;
                items.extend(
                    load_nasa(conn, &pattern, &from, &to, sort, take)?
                        .into_iter()
                        .map(ContentItem::from),
                );
            }

            sort_items(&mut items, sort);
            let page: Vec<ContentItem> = items
                .into_iter()
                .skip(offset)
                .take(PAGE_SIZE as usize)
                .collect();
            Ok((page, total))
        })
        .await
    }

    /// Most recently published items passing `filter`, for the dashboard and
    /// the related-content fallback.
    pub async fn recent(
        &self,
        filter: ContentFilter,
        limit: u32,
    ) -> Result<Vec<ContentItem>, DieselError> {
        let pool = self.pool.clone();
        let take = limit as i64;

        run_blocking(pool, move |conn| {
            let mut items: Vec<ContentItem> = Vec::new();

            if filter.matches(ContentType::Paper) {
                let records: Vec<PaperRecord> = papers::table
                    .order((papers::published_at.desc(), papers::created_at.desc()))
                    .limit(take)
                    .load(conn)?;
                items.extend(records.into_iter().map(ContentItem::from));
            }
            if filter.matches(ContentType::Video) {
                let records: Vec<VideoRecord> = videos::table
                    .order((videos::published_at.desc(), videos::created_at.desc()))
                    .limit(take)
                    .load(conn)?;
                items.extend(records.into_iter().map(ContentItem::from));
            }
            if filter.matches(ContentType::Nasa) {
                let records: Vec<NasaItemRecord> = nasa_items::table
                    .order((nasa_items::published_at.desc(), nasa_items::created_at.desc()))
                    .limit(take)
                    .load(conn)?;
                items.extend(records.into_iter().map(ContentItem::from));
            }

            sort_items(&mut items, SortOrder::Date);
            items.truncate(limit as usize);
            Ok(items)
        })
        .await
    }

    /// Get a single item by type and id.
    pub async fn get(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<Option<ContentItem>, DieselError> {
        let id = id.to_string();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| match content_type {
            ContentType::Paper => Ok(papers::table
                .find(&id)
                .first::<PaperRecord>(conn)
                .optional()?
                .map(ContentItem::from)),
            ContentType::Video => Ok(videos::table
                .find(&id)
                .first::<VideoRecord>(conn)
                .optional()?
                .map(ContentItem::from)),
            ContentType::Nasa => Ok(nasa_items::table
                .find(&id)
                .first::<NasaItemRecord>(conn)
                .optional()?
                .map(ContentItem::from)),
        })
        .await
    }

    /// Insert or replace an item in its type's table.
    pub async fn upsert(&self, item: &ContentItem) -> Result<(), DieselError> {
        let item = item.clone();
        let pool = self.pool.clone();

        run_blocking(pool, move |conn| {
            let published_at = item.published_at.map(|d| d.format("%Y-%m-%d").to_string());
            let created_at = item.created_at.to_rfc3339();
            let byline = item.byline.clone().unwrap_or_default();

            match item.content_type {
                ContentType::Paper => {
                    let category = item.category.clone().unwrap_or_default();
                    diesel::replace_into(papers::table)
                        .values(&NewPaper {
                            id: &item.id,
                            title: &item.title,
                            summary: &item.summary,
                            url: &item.url,
                            authors: &byline,
                            category: &category,
                            published_at: published_at.as_deref(),
                            created_at: &created_at,
                        })
                        .execute(conn)?;
                }
                ContentType::Video => {
                    diesel::replace_into(videos::table)
                        .values(&NewVideo {
                            id: &item.id,
                            title: &item.title,
                            summary: &item.summary,
                            url: &item.url,
                            channel: &byline,
                            published_at: published_at.as_deref(),
                            created_at: &created_at,
                        })
                        .execute(conn)?;
                }
                ContentType::Nasa => {
                    diesel::replace_into(nasa_items::table)
                        .values(&NewNasaItem {
                            id: &item.id,
                            title: &item.title,
                            summary: &item.summary,
                            url: &item.url,
                            media_type: &byline,
                            published_at: published_at.as_deref(),
                            created_at: &created_at,
                        })
                        .execute(conn)?;
                }
            }
            Ok(())
        })
        .await
    }
}

/// Wrap a query in `%...%`, escaping LIKE metacharacters so user text
/// matches literally.
fn like_pattern(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Merge sort for the combined result set. Date sort puts undated items
/// last; ties break on insertion time, newest first.
fn sort_items(items: &mut [ContentItem], sort: SortOrder) {
    match sort {
        SortOrder::Date => {
            // Descending compare sends None (undated) to the back; the id
            // tiebreak keeps page boundaries stable across requests
            items.sort_by(|a, b| {
                b.published_at
                    .cmp(&a.published_at)
                    .then_with(|| b.created_at.cmp(&a.created_at))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        SortOrder::Title => {
            items.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
    }
}

fn count_papers(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
) -> Result<u64, DieselError> {
    use diesel::dsl::count_star;
    let mut query = papers::table.select(count_star()).into_boxed();
    query = query.filter(
        papers::title
            .like(pattern.to_string())
            .escape('\\')
            .or(papers::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(papers::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(papers::published_at.le(to.clone()));
    }
    let count: i64 = query.first(conn)?;
    Ok(count as u64)
}

fn load_papers(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
    sort: SortOrder,
    take: i64,
) -> Result<Vec<PaperRecord>, DieselError> {
    let mut query = papers::table.into_boxed();
    query = query.filter(
        papers::title
            .like(pattern.to_string())
            .escape('\\')
            .or(papers::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(papers::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(papers::published_at.le(to.clone()));
    }
    query = match sort {
        SortOrder::Date => query.order((
            papers::published_at.desc(),
            papers::created_at.desc(),
            papers::id.asc(),
        )),
        SortOrder::Title => query.order((papers::title.asc(), papers::id.asc())),
    };
    query.limit(take).load(conn)
}

fn count_videos(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
) -> Result<u64, DieselError> {
    use diesel::dsl::count_star;
    let mut query = videos::table.select(count_star()).into_boxed();
    query = query.filter(
        videos::title
            .like(pattern.to_string())
            .escape('\\')
            .or(videos::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(videos::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(videos::published_at.le(to.clone()));
    }
    let count: i64 = query.first(conn)?;
    Ok(count as u64)
}

fn load_videos(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
    sort: SortOrder,
    take: i64,
) -> Result<Vec<VideoRecord>, DieselError> {
    let mut query = videos::table.into_boxed();
    query = query.filter(
        videos::title
            .like(pattern.to_string())
            .escape('\\')
            .or(videos::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(videos::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(videos::published_at.le(to.clone()));
    }
    query = match sort {
        SortOrder::Date => query.order((
            videos::published_at.desc(),
            videos::created_at.desc(),
            videos::id.asc(),
        )),
        SortOrder::Title => query.order((videos::title.asc(), videos::id.asc())),
    };
    query.limit(take).load(conn)
}

fn count_nasa(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
) -> Result<u64, DieselError> {
    use diesel::dsl::count_star;
    let mut query = nasa_items::table.select(count_star()).into_boxed();
    query = query.filter(
        nasa_items::title
            .like(pattern.to_string())
            .escape('\\')
            .or(nasa_items::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(nasa_items::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(nasa_items::published_at.le(to.clone()));
    }
    let count: i64 = query.first(conn)?;
    Ok(count as u64)
}

fn load_nasa(
    conn: &mut SqliteConnection,
    pattern: &str,
    from: &Option<String>,
    to: &Option<String>,
    sort: SortOrder,
    take: i64,
) -> Result<Vec<NasaItemRecord>, DieselError> {
    let mut query = nasa_items::table.into_boxed();
    query = query.filter(
        nasa_items::title
            .like(pattern.to_string())
            .escape('\\')
            .or(nasa_items::summary.like(pattern.to_string()).escape('\\')),
    );
    if let Some(from) = from {
        query = query.filter(nasa_items::published_at.ge(from.clone()));
    }
    if let Some(to) = to {
        query = query.filter(nasa_items::published_at.le(to.clone()));
    }
    query = match sort {
        SortOrder::Date => query.order((
            nasa_items::published_at.desc(),
            nasa_items::created_at.desc(),
            nasa_items::id.asc(),
        )),
        SortOrder::Title => query.order((nasa_items::title.asc(), nasa_items::id.asc())),
    };
    query.limit(take).load(conn)
}
