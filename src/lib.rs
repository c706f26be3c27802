//! AstroGroot: an astronomy research content portal.
//!
//! Stores papers, videos, and NASA media items in a local SQLite library,
//! renders HTML pages for browsing and searching them, and exposes a thin
//! JSON search/stats API plus an MCP integration endpoint for AI assistants.

pub mod config;
pub mod ingest;
pub mod locale;
pub mod mcp;
pub mod models;
pub mod repository;
pub mod schema;
pub mod search;
pub mod server;
