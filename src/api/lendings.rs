//! Lending management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{BookStatus, Lending, LendingDraft, LendingSort, ListQuery, Page},
    AppState,
};

use super::DeleteResponse;

/// Return response with the closed lending
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    pub lending: Lending,
    /// Status the returned book moves to
    pub book_status: BookStatus,
}

/// List lendings with search, sort and pagination
#[utoipa::path(
    get,
    path = "/lendings",
    tag = "lendings",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("sort" = Option<String>, Query, description = "borrow_date (default), due_date, return_date or id"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<usize>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<usize>, Query, description = "Items per page (default: 5)")
    ),
    responses(
        (status = 200, description = "Page of lendings", body = Page<Lending>)
    )
)]
pub async fn list_lendings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<LendingSort>>,
) -> AppResult<Json<Page<Lending>>> {
    let page = state.services.lendings.list_lendings(&query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/lendings/{id}",
    tag = "lendings",
    params(
        ("id" = i32, Path, description = "Lending ID")
    ),
    responses(
        (status = 200, description = "Lending details", body = Lending),
        (status = 404, description = "Lending not found")
    )
)]
pub async fn get_lending(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Lending>> {
    let lending = state.services.lendings.get_lending(id).await?;
    Ok(Json(lending))
}

/// Create a new lending (borrow a book)
#[utoipa::path(
    post,
    path = "/lendings",
    tag = "lendings",
    request_body = LendingDraft,
    responses(
        (status = 201, description = "Lending created", body = Lending),
        (status = 400, description = "Lending rules violated"),
        (status = 404, description = "Book or member not found"),
        (status = 409, description = "Book already lent")
    )
)]
pub async fn create_lending(
    State(state): State<AppState>,
    Json(draft): Json<LendingDraft>,
) -> AppResult<(StatusCode, Json<Lending>)> {
    let lending = state.services.lendings.create_lending(draft).await?;
    Ok((StatusCode::CREATED, Json(lending)))
}

#[utoipa::path(
    put,
    path = "/lendings/{id}",
    tag = "lendings",
    params(
        ("id" = i32, Path, description = "Lending ID")
    ),
    request_body = LendingDraft,
    responses(
        (status = 200, description = "Lending updated", body = Lending),
        (status = 400, description = "Lending rules violated"),
        (status = 404, description = "Lending, book or member not found"),
        (status = 409, description = "Book already lent")
    )
)]
pub async fn update_lending(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<LendingDraft>,
) -> AppResult<Json<Lending>> {
    let lending = state.services.lendings.update_lending(id, draft).await?;
    Ok(Json(lending))
}

/// Mark a lending returned as of today
#[utoipa::path(
    post,
    path = "/lendings/{id}/return",
    tag = "lendings",
    params(
        ("id" = i32, Path, description = "Lending ID")
    ),
    responses(
        (status = 200, description = "Lending returned", body = ReturnResponse),
        (status = 404, description = "Lending not found"),
        (status = 409, description = "Lending already returned")
    )
)]
pub async fn return_lending(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let (lending, book_status) = state.services.lendings.return_lending(id).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        lending,
        book_status,
    }))
}

#[utoipa::path(
    delete,
    path = "/lendings/{id}",
    tag = "lendings",
    params(
        ("id" = i32, Path, description = "Lending ID")
    ),
    responses(
        (status = 200, description = "Lending deleted", body = DeleteResponse),
        (status = 404, description = "Lending not found")
    )
)]
pub async fn delete_lending(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.lendings.delete_lending(id).await?;
    Ok(Json(DeleteResponse::deleted(id)))
}
