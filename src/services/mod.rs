//! Business logic services

pub mod catalog;
pub mod loans;
pub mod stats;
pub mod visits;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
    pub visits: visits::VisitsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config),
            loans: loans::LoansService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            visits: visits::VisitsService::new(repository),
        }
    }
}
