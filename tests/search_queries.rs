//! Tests for the repository search queries and the search service envelope.
//!
//! Verifies type partitioning, date filtering, pagination counts, and the
//! related-content fallback against a real temporary database.

use chrono::NaiveDate;

use astrogroot::models::{
    ContentFilter, ContentItem, ContentType, SearchQuery, SortOrder, PAGE_SIZE,
};
use astrogroot::repository::{create_pool, migrations, ContentRepository};
use astrogroot::search::SearchService;

/// Create a temporary SQLite database with the schema applied.
async fn setup_test_db() -> (ContentRepository, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    (ContentRepository::new(pool), dir)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

fn item(
    id: &str,
    content_type: ContentType,
    title: &str,
    summary: &str,
    published: Option<&str>,
) -> ContentItem {
    let mut item = ContentItem::new(
        id,
        content_type,
        title,
        summary,
        format!("https://example.com/{id}"),
    );
    if let Some(published) = published {
        item = item.published_at(date(published));
    }
    item
}

async fn store(repo: &ContentRepository, items: Vec<ContentItem>) {
    for it in &items {
        repo.upsert(it).await.expect("Failed to store item");
    }
}

// ============================================================================
// stats
// ============================================================================

#[tokio::test]
async fn stats_counts_each_table() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "A", "", None),
            item("p2", ContentType::Paper, "B", "", None),
            item("v1", ContentType::Video, "C", "", None),
            item("n1", ContentType::Nasa, "D", "", None),
        ],
    )
    .await;

    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.papers, 2);
    assert_eq!(stats.videos, 1);
    assert_eq!(stats.nasa, 1);
    assert_eq!(stats.total, 4);
}

#[tokio::test]
async fn stats_empty_library_is_all_zero() {
    let (repo, _dir) = setup_test_db().await;
    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.total, 0);
}

// ============================================================================
// repository search
// ============================================================================

#[tokio::test]
async fn search_matches_title_and_summary() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Black hole mergers", "", Some("2024-01-01")),
            item("p2", ContentType::Paper, "Something else", "we discuss black holes", Some("2024-02-01")),
            item("p3", ContentType::Paper, "Unrelated", "galaxies only", Some("2024-03-01")),
        ],
    )
    .await;

    let query = SearchQuery::new("black hole");
    let (items, total) = repo.search(&query).await.unwrap();
    assert_eq!(total, 2);
    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert!(ids.contains(&"p1"));
    assert!(ids.contains(&"p2"));
}

#[tokio::test]
async fn search_respects_type_filter() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Mars geology", "", None),
            item("v1", ContentType::Video, "Mars rover tour", "", None),
            item("n1", ContentType::Nasa, "Mars panorama", "", None),
        ],
    )
    .await;

    let query = SearchQuery::new("mars").filter(ContentFilter::Videos);
    let (items, total) = repo.search(&query).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].content_type, ContentType::Video);
}

#[tokio::test]
async fn search_respects_date_range() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Nebula early", "", Some("2023-06-01")),
            item("p2", ContentType::Paper, "Nebula middle", "", Some("2024-03-15")),
            item("p3", ContentType::Paper, "Nebula late", "", Some("2025-01-01")),
        ],
    )
    .await;

    let query = SearchQuery::new("nebula")
        .date_range(Some(date("2024-01-01")), Some(date("2024-12-31")));
    let (items, total) = repo.search(&query).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "p2");
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![item("p1", ContentType::Paper, "Exoplanet Atlas", "", None)],
    )
    .await;

    let (_, total) = repo.search(&SearchQuery::new("EXOPLANET")).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn search_pages_beyond_first() {
    let (repo, _dir) = setup_test_db().await;
    let mut items = Vec::new();
    for i in 0..25 {
        items.push(item(
            &format!("p{i:02}"),
            ContentType::Paper,
            &format!("Pulsar survey part {i}"),
            "",
            Some(&format!("2024-01-{:02}", (i % 28) + 1)),
        ));
    }
    store(&repo, items).await;

    let first = SearchQuery::new("pulsar");
    let (page1, total) = repo.search(&first).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(page1.len(), PAGE_SIZE as usize);

    let second = SearchQuery::new("pulsar").page(2);
    let (page2, total2) = repo.search(&second).await.unwrap();
    assert_eq!(total2, 25);
    assert_eq!(page2.len(), 5);

    // No overlap between the pages
    let ids1: Vec<_> = page1.iter().map(|i| i.id.clone()).collect();
    assert!(page2.iter().all(|i| !ids1.contains(&i.id)));
}

#[tokio::test]
async fn search_sorts_newest_first_by_default() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Comet old", "", Some("2020-01-01")),
            item("p2", ContentType::Paper, "Comet new", "", Some("2024-01-01")),
            item("p3", ContentType::Paper, "Comet undated", "", None),
        ],
    )
    .await;

    let (items, _) = repo.search(&SearchQuery::new("comet")).await.unwrap();
    assert_eq!(items[0].id, "p2");
    assert_eq!(items[1].id, "p1");
    assert_eq!(items[2].id, "p3");
}

#[tokio::test]
async fn search_sorts_by_title_when_asked() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Zodiacal dust", "", Some("2024-01-01")),
            item("p2", ContentType::Paper, "Asteroid dust", "", Some("2020-01-01")),
        ],
    )
    .await;

    let query = SearchQuery::new("dust").sort(SortOrder::Title);
    let (items, _) = repo.search(&query).await.unwrap();
    assert_eq!(items[0].id, "p2");
}

#[tokio::test]
async fn like_metacharacters_match_literally() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "100% vacuum energy", "", None),
            item("p2", ContentType::Paper, "100x vacuum energy", "", None),
        ],
    )
    .await;

    let (items, total) = repo.search(&SearchQuery::new("100%")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "p1");
}

// ============================================================================
// upsert / get
// ============================================================================

#[tokio::test]
async fn upsert_replaces_existing_row() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![item("p1", ContentType::Paper, "Draft title", "", None)],
    )
    .await;
    store(
        &repo,
        vec![item("p1", ContentType::Paper, "Final title", "", Some("2024-05-01"))],
    )
    .await;

    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.papers, 1);

    let fetched = repo.get(ContentType::Paper, "p1").await.unwrap().unwrap();
    assert_eq!(fetched.title, "Final title");
    assert_eq!(fetched.published_at, Some(date("2024-05-01")));
}

#[tokio::test]
async fn get_unknown_id_is_none() {
    let (repo, _dir) = setup_test_db().await;
    assert!(repo.get(ContentType::Nasa, "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn get_looks_in_the_right_table() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![item("x1", ContentType::Video, "A video", "", None)],
    )
    .await;

    assert!(repo.get(ContentType::Video, "x1").await.unwrap().is_some());
    assert!(repo.get(ContentType::Paper, "x1").await.unwrap().is_none());
}

// ============================================================================
// search service envelope
// ============================================================================

#[tokio::test]
async fn empty_query_returns_empty_envelope() {
    let (repo, _dir) = setup_test_db().await;
    let service = SearchService::new(repo);

    let results = service.search(&SearchQuery::new("   ")).await.unwrap();
    assert_eq!(results.total, 0);
    assert_eq!(results.item_count(), 0);
    assert!(results.pagination.is_none());
    assert!(!results.showing_related);
}

#[tokio::test]
async fn envelope_counts_agree_with_buckets() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Quasar jets", "", Some("2024-01-01")),
            item("v1", ContentType::Video, "Quasar explained", "", Some("2024-02-01")),
            item("n1", ContentType::Nasa, "Quasar image", "", Some("2024-03-01")),
        ],
    )
    .await;
    let service = SearchService::new(repo);

    let results = service.search(&SearchQuery::new("quasar")).await.unwrap();
    assert_eq!(results.total, 3);
    assert_eq!(
        results.item_count(),
        results.papers.len() + results.videos.len() + results.nasa.len()
    );
    assert_eq!(results.papers.len(), 1);
    assert_eq!(results.videos.len(), 1);
    assert_eq!(results.nasa.len(), 1);
    assert!(!results.showing_related);
    assert!(results.papers[0].low_relevance == false);

    let pagination = results.pagination.unwrap();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.total_pages, 1);
    assert!(!pagination.has_next);
    assert!(!pagination.has_prev);
}

#[tokio::test]
async fn envelope_pagination_flags_middle_page() {
    let (repo, _dir) = setup_test_db().await;
    let mut items = Vec::new();
    for i in 0..45 {
        items.push(item(
            &format!("p{i:02}"),
            ContentType::Paper,
            &format!("Supernova catalog {i}"),
            "",
            Some("2024-01-01"),
        ));
    }
    store(&repo, items).await;
    let service = SearchService::new(repo);

    let results = service
        .search(&SearchQuery::new("supernova").page(2))
        .await
        .unwrap();
    assert_eq!(results.total, 45);
    assert_eq!(results.item_count(), PAGE_SIZE as usize);

    let pagination = results.pagination.unwrap();
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.total_pages, 3);
    assert!(pagination.has_next);
    assert!(pagination.has_prev);
}

#[tokio::test]
async fn no_match_falls_back_to_related() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Galaxy formation", "", Some("2024-01-01")),
            item("v1", ContentType::Video, "Galaxy tour", "", Some("2024-02-01")),
        ],
    )
    .await;
    let service = SearchService::new(repo);

    let results = service
        .search(&SearchQuery::new("zzzzz-no-such-topic"))
        .await
        .unwrap();
    assert!(results.showing_related);
    assert_eq!(results.total, 2);
    assert!(results.papers.iter().all(|i| i.low_relevance));
    assert!(results.videos.iter().all(|i| i.low_relevance));
}

#[tokio::test]
async fn fallback_respects_type_filter() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            item("p1", ContentType::Paper, "Galaxy formation", "", None),
            item("v1", ContentType::Video, "Galaxy tour", "", None),
        ],
    )
    .await;
    let service = SearchService::new(repo);

    let results = service
        .search(&SearchQuery::new("zzzzz").filter(ContentFilter::Papers))
        .await
        .unwrap();
    assert!(results.showing_related);
    assert_eq!(results.videos.len(), 0);
    assert!(!results.papers.is_empty());
}

#[tokio::test]
async fn no_match_in_empty_library_is_truly_empty() {
    let (repo, _dir) = setup_test_db().await;
    let service = SearchService::new(repo);

    let results = service.search(&SearchQuery::new("anything")).await.unwrap();
    assert_eq!(results.total, 0);
    assert!(!results.showing_related);
    assert!(results.pagination.is_none());
}

#[tokio::test]
async fn example_request_black_holes() {
    let (repo, _dir) = setup_test_db().await;
    store(
        &repo,
        vec![
            ContentItem::new(
                "p1",
                ContentType::Paper,
                "On Black Holes",
                "A study of event horizons.",
                "https://arxiv.org/abs/2401.00001",
            )
            .published_at(date("2024-01-01")),
            item("v9", ContentType::Video, "Unrelated video", "", None),
        ],
    )
    .await;
    let service = SearchService::new(repo);

    let query = SearchQuery::new("black holes").filter(ContentFilter::Papers);
    let results = service.search(&query).await.unwrap();

    assert_eq!(results.total, 1);
    assert_eq!(results.papers.len(), 1);
    assert!(results.videos.is_empty());
    assert!(results.nasa.is_empty());
    assert_eq!(results.papers[0].title, "On Black Holes");
    assert_eq!(results.papers[0].id, "p1");

    let pagination = results.pagination.unwrap();
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.total_pages, 1);
    assert!(!pagination.has_next);
    assert!(!pagination.has_prev);

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["papers"][0]["type"], "paper");
    assert_eq!(json["papers"][0]["publishedDate"], "2024-01-01");
}
