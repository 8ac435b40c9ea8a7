//! Session visit counter endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::visit::{RecordVisit, VisitCount},
};

/// Record a visit for a session. The first call for a session id creates the
/// counter at 1; subsequent calls increment it.
#[utoipa::path(
    post,
    path = "/visits",
    tag = "visits",
    request_body = RecordVisit,
    responses(
        (status = 200, description = "Updated counter for the session", body = VisitCount),
        (status = 400, description = "Invalid session id")
    )
)]
pub async fn record_visit(
    State(state): State<crate::AppState>,
    Json(request): Json<RecordVisit>,
) -> AppResult<Json<VisitCount>> {
    let visit = state.services.visits.record_visit(request).await?;
    Ok(Json(visit))
}

/// Get the visit counter for a session
#[utoipa::path(
    get,
    path = "/visits/{session_id}",
    tag = "visits",
    params(("session_id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Counter for the session", body = VisitCount),
        (status = 404, description = "Session has no recorded visits")
    )
)]
pub async fn get_visits(
    State(state): State<crate::AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<VisitCount>> {
    let visit = state.services.visits.get_visits(&session_id).await?;
    Ok(Json(visit))
}
