//! Diesel ORM records for the content tables.
//!
//! These models provide compile-time type checking for database operations.
//! Record structs map 1:1 to rows; conversion into the `ContentItem` domain
//! model lives in the content repository.

use diesel::prelude::*;

use crate::schema;

/// Paper row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::papers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub authors: String,
    pub category: String,
    pub published_at: Option<String>,
    pub created_at: String,
}

/// New paper for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::papers)]
pub struct NewPaper<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub url: &'a str,
    pub authors: &'a str,
    pub category: &'a str,
    pub published_at: Option<&'a str>,
    pub created_at: &'a str,
}

/// Video row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::videos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub channel: String,
    pub published_at: Option<String>,
    pub created_at: String,
}

/// New video for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::videos)]
pub struct NewVideo<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub url: &'a str,
    pub channel: &'a str,
    pub published_at: Option<&'a str>,
    pub created_at: &'a str,
}

/// NASA media row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::nasa_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NasaItemRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub media_type: String,
    pub published_at: Option<String>,
    pub created_at: String,
}

/// New NASA item for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::nasa_items)]
pub struct NewNasaItem<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub url: &'a str,
    pub media_type: &'a str,
    pub published_at: Option<&'a str>,
    pub created_at: &'a str,
}
