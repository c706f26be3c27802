//! Web server for the content portal.
//!
//! Serves the HTML pages (dashboard, search, detail, 404), the JSON
//! search/stats API, and the MCP integration endpoint.

pub mod handlers;
mod routes;
pub mod templates;

pub use routes::create_router;

use std::net::SocketAddr;

use crate::config::Settings;
use crate::mcp::McpRegistry;
use crate::repository::{create_pool, migrations, ContentRepository};
use crate::search::SearchService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: ContentRepository,
    pub search: SearchService,
    pub mcp: McpRegistry,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        settings.ensure_directories()?;
        let pool = create_pool(&settings.database_path())?;
        migrations::run_migrations(&pool).await?;

        let repo = ContentRepository::new(pool);
        let search = SearchService::new(repo.clone());
        let mcp = McpRegistry::new(repo.clone());

        Ok(Self { repo, search, mcp })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
