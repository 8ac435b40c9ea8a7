//! Catalog statistics service

use crate::{
    api::stats::CatalogStats,
    error::AppResult,
    models::book_instance::LoanStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Summary counts for the catalog landing page
    pub async fn get_stats(&self) -> AppResult<CatalogStats> {
        let books = self.repository.books.count().await?;
        let instances = self.repository.instances.count().await?;
        let instances_available = self
            .repository
            .instances
            .count_with_status(LoanStatus::Available)
            .await?;
        let authors = self.repository.authors.count().await?;

        Ok(CatalogStats {
            books,
            instances,
            instances_available,
            authors,
        })
    }
}
