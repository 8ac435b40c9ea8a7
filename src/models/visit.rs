//! Session visit counter model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Per-session visit counter. The session id comes from the caller; this
/// server only owns the count.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VisitCount {
    pub session_id: String,
    pub count: i64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Record visit request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordVisit {
    #[validate(length(min = 1, max = 128, message = "Session id must be 1-128 characters"))]
    pub session_id: String,
}
