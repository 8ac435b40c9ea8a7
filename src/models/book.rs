//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::genre::Genre;

/// Full book model (DB + API). Author and genres are loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    /// Nulled when the author is deleted
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    /// "Last, First" display name of the author, when one is set
    pub author_name: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    #[serde(default)]
    pub summary: String,
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub author_id: Option<i32>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    pub isbn: Option<String>,
    /// When set, replaces the full genre set
    pub genre_ids: Option<Vec<i32>>,
}

/// Book query parameters (API)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Title substring filter; an empty string matches everything
    pub title: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
