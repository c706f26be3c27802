//! Schema setup for the content library.
//!
//! The schema is small enough that an idempotent CREATE batch at startup
//! replaces a full migration runner. Statements run on every start; IF NOT
//! EXISTS makes repeat runs no-ops.

use diesel::prelude::*;

use super::pool::{init_connection_pragmas, run_blocking, DieselError, SqlitePool};

const SCHEMA_SQL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS papers (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        url TEXT NOT NULL,
        authors TEXT NOT NULL,
        category TEXT NOT NULL,
        published_at TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS videos (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        url TEXT NOT NULL,
        channel TEXT NOT NULL,
        published_at TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS nasa_items (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        summary TEXT NOT NULL,
        url TEXT NOT NULL,
        media_type TEXT NOT NULL,
        published_at TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_papers_published ON papers (published_at)",
    "CREATE INDEX IF NOT EXISTS idx_videos_published ON videos (published_at)",
    "CREATE INDEX IF NOT EXISTS idx_nasa_published ON nasa_items (published_at)",
];

/// Apply pragmas and create any missing tables.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DieselError> {
    let pool = pool.clone();
    run_blocking(pool, |conn| {
        init_connection_pragmas(conn)?;
        for stmt in SCHEMA_SQL {
            diesel::sql_query(*stmt).execute(conn)?;
        }
        Ok(())
    })
    .await
}
