//! Request handlers for pages, the JSON API, and the MCP endpoint.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::templates;
use super::AppState;
use crate::locale::Locale;
use crate::mcp::{McpRequest, McpResponse, ERR_INVALID_REQUEST};
use crate::models::{ContentFilter, ContentType, LibraryStats, SearchQuery, SearchResults, SortOrder, PAGE_SIZE};

/// Query parameters shared by the search page and `/api/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SearchParams {
    fn locale(&self) -> Locale {
        Locale::from_tag(self.lang.as_deref().unwrap_or("en"))
    }

    fn to_query(&self) -> SearchQuery {
        // Malformed dates are dropped rather than failing the request
        let parse = |s: &Option<String>| {
            s.as_deref()
                .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
        };

        SearchQuery::new(self.q.clone().unwrap_or_default())
            .filter(ContentFilter::from_param(
                self.content_type.as_deref().unwrap_or("all"),
            ))
            .page(self.page.unwrap_or(1))
            .sort(SortOrder::from_param(self.sort.as_deref().unwrap_or("date")))
            .date_range(parse(&self.date_from), parse(&self.date_to))
            .locale(self.locale())
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: String,
    #[serde(default)]
    pub lang: Option<String>,
}

/// `GET /` - dashboard with library stats and recent items.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let locale = params.locale();

    let stats = state.repo.stats().await.unwrap_or_else(|e| {
        tracing::warn!("Stats query failed, showing zeros: {}", e);
        LibraryStats::default()
    });
    let recent = state
        .repo
        .recent(ContentFilter::All, 8)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Recent-items query failed: {}", e);
            Vec::new()
        });

    Html(templates::dashboard_page(locale, &stats, &recent))
}

/// `GET /search` - search page shell; results render client-side.
pub async fn search_page(Query(params): Query<SearchParams>) -> Html<String> {
    Html(templates::search_page(params.locale(), &params))
}

/// `GET /detail` - server-rendered item detail, 404 page for unknown ids.
pub async fn detail_page(
    State(state): State<AppState>,
    Query(params): Query<DetailParams>,
) -> impl IntoResponse {
    let locale = Locale::from_tag(params.lang.as_deref().unwrap_or("en"));

    let item = match ContentType::from_str(&params.content_type) {
        Some(content_type) => state
            .repo
            .get(content_type, &params.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Detail lookup failed for {}: {}", params.id, e);
                None
            }),
        None => None,
    };

    match item {
        Some(item) => (
            StatusCode::OK,
            Html(templates::detail_page(locale, &item)),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Html(templates::not_found_page(locale)),
        ),
    }
}

/// `GET /api/search` - the search API consumed by the results renderer.
///
/// Internal failures answer HTTP 500 but still carry the envelope shape so
/// the client renderer has an `error` field to show.
pub async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if params.limit.is_some_and(|l| l != PAGE_SIZE) {
        tracing::debug!("Ignoring non-default limit={:?}", params.limit);
    }

    let query = params.to_query();
    match state.search.search(&query).await {
        Ok(results) => (StatusCode::OK, Json(results)),
        Err(e) => {
            tracing::error!("Search failed for {:?}: {}", query.text, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResults::failure(query.text, e.to_string())),
            )
        }
    }
}

/// `GET /api/stats` - aggregate counts; degrades to all-zero on failure.
pub async fn api_stats(State(state): State<AppState>) -> Json<LibraryStats> {
    match state.repo.stats().await {
        Ok(stats) => Json(stats),
        Err(e) => {
            tracing::warn!("Stats query failed, returning zeros: {}", e);
            Json(LibraryStats::default())
        }
    }
}

/// `POST /mcp` - method dispatch for the AI-assistant integration.
///
/// The body is parsed here rather than by an extractor so a malformed body
/// still gets an error envelope instead of a bare transport 400.
pub async fn mcp_endpoint(State(state): State<AppState>, body: String) -> Json<McpResponse> {
    let request: McpRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(McpResponse::error(
                None,
                ERR_INVALID_REQUEST,
                format!("invalid request: {}", e),
            ))
        }
    };

    Json(state.mcp.dispatch(request).await)
}

pub async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        templates::CSS,
    )
}

pub async fn search_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        templates::SEARCH_JS,
    )
}

pub async fn calendar_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        templates::CALENDAR_JS,
    )
}

/// Fallback for unknown paths.
pub async fn not_found(Query(params): Query<SearchParams>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(templates::not_found_page(params.locale())),
    )
}
