//! Tests for the MCP method registry and its error branches.

use serde_json::{json, Value};

use astrogroot::mcp::{
    McpRegistry, McpRequest, ERR_INVALID_PARAMS, ERR_METHOD_NOT_FOUND,
};
use astrogroot::models::{ContentItem, ContentType};
use astrogroot::repository::{create_pool, migrations, ContentRepository};

async fn setup_registry() -> (McpRegistry, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let repo = ContentRepository::new(pool);
    (McpRegistry::new(repo), dir)
}

async fn seeded_registry() -> (McpRegistry, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let pool = create_pool(&db_path).expect("Failed to create pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let repo = ContentRepository::new(pool);
    repo.upsert(
        &ContentItem::new(
            "p1",
            ContentType::Paper,
            "Gravitational Lensing Review",
            "Strong and weak lensing.",
            "https://arxiv.org/abs/2402.00001",
        )
        .byline("C. Observer"),
    )
    .await
    .expect("Failed to seed item");

    (McpRegistry::new(repo), dir)
}

fn request(method: &str, params: Value) -> McpRequest {
    McpRequest {
        method: method.to_string(),
        params,
        id: Some(json!(1)),
    }
}

#[tokio::test]
async fn unknown_method_hits_default_branch() {
    let (registry, _dir) = setup_registry().await;

    let response = registry.dispatch(request("launch_rocket", json!({}))).await;
    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, ERR_METHOD_NOT_FOUND);
    assert!(error.message.contains("launch_rocket"));
    // The request id is echoed back even on errors
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn registry_lists_its_methods() {
    let (registry, _dir) = setup_registry().await;
    assert_eq!(
        registry.method_names(),
        vec!["get_item", "get_stats", "search_content"]
    );
}

#[tokio::test]
async fn get_stats_returns_counts() {
    let (registry, _dir) = seeded_registry().await;

    let response = registry.dispatch(request("get_stats", json!({}))).await;
    let result = response.result.expect("expected a result");
    assert_eq!(result["papers"], 1);
    assert_eq!(result["total"], 1);
}

#[tokio::test]
async fn search_content_returns_envelope() {
    let (registry, _dir) = seeded_registry().await;

    let response = registry
        .dispatch(request(
            "search_content",
            json!({"query": "lensing", "type": "papers"}),
        ))
        .await;
    let result = response.result.expect("expected a result");
    assert_eq!(result["total"], 1);
    assert_eq!(result["papers"][0]["title"], "Gravitational Lensing Review");
    assert!(result["videos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_content_rejects_bad_params() {
    let (registry, _dir) = setup_registry().await;

    // "query" is required
    let response = registry
        .dispatch(request("search_content", json!({"page": 1})))
        .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, ERR_INVALID_PARAMS);
}

#[tokio::test]
async fn get_item_round_trips() {
    let (registry, _dir) = seeded_registry().await;

    let response = registry
        .dispatch(request("get_item", json!({"type": "paper", "id": "p1"})))
        .await;
    let result = response.result.expect("expected a result");
    assert_eq!(result["title"], "Gravitational Lensing Review");
    assert_eq!(result["byline"], "C. Observer");
}

#[tokio::test]
async fn get_item_unknown_id_is_an_error() {
    let (registry, _dir) = seeded_registry().await;

    let response = registry
        .dispatch(request("get_item", json!({"type": "paper", "id": "nope"})))
        .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, ERR_INVALID_PARAMS);
    assert!(error.message.contains("nope"));
}

#[tokio::test]
async fn get_item_unknown_type_is_an_error() {
    let (registry, _dir) = setup_registry().await;

    let response = registry
        .dispatch(request("get_item", json!({"type": "comet", "id": "x"})))
        .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, ERR_INVALID_PARAMS);
    assert!(error.message.contains("comet"));
}
