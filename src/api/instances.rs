//! Book instance (copy) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{
        BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

/// List book instances ordered by due date
#[utoipa::path(
    get,
    path = "/instances",
    tag = "instances",
    params(
        ("status" = Option<String>, Query, description = "Filter by status code (m/o/a/r)"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<i64>, Query, description = "Instances per page (default from config)")
    ),
    responses(
        (status = 200, description = "List of instances", body = PaginatedResponse<BookInstance>)
    )
)]
pub async fn list_instances(
    State(state): State<crate::AppState>,
    Query(query): Query<BookInstanceQuery>,
) -> AppResult<Json<PaginatedResponse<BookInstance>>> {
    let (page, per_page) = state.services.catalog.page_params(query.page, query.per_page);
    let (items, total) = state.services.catalog.list_instances(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page,
        per_page,
    }))
}

/// Get instance details by UUID
#[utoipa::path(
    get,
    path = "/instances/{id}",
    tag = "instances",
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 200, description = "Instance details", body = BookInstance),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.get_instance(id).await?;
    Ok(Json(instance))
}

/// Create a new instance. Status defaults to Maintenance.
#[utoipa::path(
    post,
    path = "/instances",
    tag = "instances",
    security(("bearer_auth" = [])),
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Instance created", body = BookInstance),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Missing catalog permission"),
        (status = 404, description = "Referenced book or user not found")
    )
)]
pub async fn create_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    claims.require_manage_catalog()?;

    let instance = state.services.catalog.create_instance(request).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

/// Update an instance
#[utoipa::path(
    put,
    path = "/instances/{id}",
    tag = "instances",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Instance UUID")),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Instance updated", body = BookInstance),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    claims.require_manage_catalog()?;

    let instance = state.services.catalog.update_instance(id, request).await?;
    Ok(Json(instance))
}

/// Delete an instance
#[utoipa::path(
    delete,
    path = "/instances/{id}",
    tag = "instances",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Instance UUID")),
    responses(
        (status = 204, description = "Instance deleted"),
        (status = 404, description = "Instance not found")
    )
)]
pub async fn delete_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_manage_catalog()?;

    state.services.catalog.delete_instance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
