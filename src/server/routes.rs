//! Route table for the portal.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/search", get(handlers::search_page))
        .route("/detail", get(handlers::detail_page))
        .route("/api/search", get(handlers::api_search))
        .route("/api/stats", get(handlers::api_stats))
        .route("/mcp", post(handlers::mcp_endpoint))
        .route("/static/style.css", get(handlers::style_css))
        .route("/static/search.js", get(handlers::search_js))
        .route("/static/calendar.js", get(handlers::calendar_js))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
