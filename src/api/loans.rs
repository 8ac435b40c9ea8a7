//! Loan lifecycle endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, models::book_instance::BookInstance};

use super::AuthenticatedUser;

/// Return response with the updated instance
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// The returned copy, now available and without a borrower
    pub instance: BookInstance,
}

/// List the copies currently on loan to the authenticated user,
/// soonest due first
#[utoipa::path(
    get,
    path = "/my/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Copies on loan to the caller", body = Vec<BookInstance>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookInstance>>> {
    let loans = state.services.loans.list_for_user(claims.user_id).await?;
    Ok(Json(loans))
}

/// Mark a borrowed copy returned.
/// Requires the can_mark_returned permission, and the caller must be the
/// copy's current borrower.
#[utoipa::path(
    post,
    path = "/instances/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Copy returned", body = ReturnResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Missing permission or not the borrower"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn return_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReturnResponse>> {
    let instance = state.services.loans.return_instance(id, &claims).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        instance,
    }))
}
