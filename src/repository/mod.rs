//! SQLite persistence layer for the content library.
//!
//! Uses sync Diesel with r2d2 pooling wrapped in `spawn_blocking`, since
//! diesel-async does not support SQLite.

pub mod content;
pub mod migrations;
pub mod pool;
pub mod records;

pub use content::ContentRepository;
pub use pool::{create_pool, run_blocking, SqlitePool};

use chrono::{DateTime, NaiveDate, Utc};

/// Parse an RFC 3339 timestamp stored as text, falling back to now.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional ISO date column.
pub(crate) fn parse_date_opt(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}
