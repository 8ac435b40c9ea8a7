//! Catalog statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Summary counts for the catalog landing page
#[derive(Serialize, ToSchema)]
pub struct CatalogStats {
    /// Total number of books
    pub books: i64,
    /// Total number of copies
    pub instances: i64,
    /// Copies currently available
    pub instances_available: i64,
    /// Total number of authors
    pub authors: i64,
}

/// Get catalog summary statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalog statistics", body = CatalogStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<CatalogStats>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
