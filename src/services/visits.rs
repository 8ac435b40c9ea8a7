//! Session visit counter service

use validator::Validate;

use crate::{
    error::AppResult,
    models::visit::{RecordVisit, VisitCount},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Increment and return the counter for a session
    pub async fn record_visit(&self, visit: RecordVisit) -> AppResult<VisitCount> {
        visit.validate()?;
        self.repository.visits.record(&visit.session_id).await
    }

    /// Current counter for a session
    pub async fn get_visits(&self, session_id: &str) -> AppResult<VisitCount> {
        self.repository.visits.get(session_id).await
    }
}
