//! Session visit counter repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::visit::VisitCount,
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Postgres>,
}

impl VisitsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Record a visit for a session, creating the counter on first sight
    pub async fn record(&self, session_id: &str) -> AppResult<VisitCount> {
        let count = sqlx::query_as::<_, VisitCount>(
            r#"
            INSERT INTO visit_counts (session_id, count, first_seen, last_seen)
            VALUES ($1, 1, NOW(), NOW())
            ON CONFLICT (session_id)
            DO UPDATE SET count = visit_counts.count + 1, last_seen = NOW()
            RETURNING *
            "#,
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Get the counter for a session
    pub async fn get(&self, session_id: &str) -> AppResult<VisitCount> {
        sqlx::query_as::<_, VisitCount>("SELECT * FROM visit_counts WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No visits recorded for session {}", session_id))
            })
    }
}
