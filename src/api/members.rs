//! Member endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{ListQuery, Member, MemberDraft, MemberSort, Page},
    AppState,
};

use super::DeleteResponse;

/// List members with search, sort and pagination
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("sort" = Option<String>, Query, description = "full_name (default), joining_date or email"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<usize>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<usize>, Query, description = "Items per page (default: 5)")
    ),
    responses(
        (status = 200, description = "Page of members", body = Page<Member>)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<MemberSort>>,
) -> AppResult<Json<Page<Member>>> {
    let page = state.services.members.list_members(&query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Member>> {
    let member = state.services.members.get_member(id).await?;
    Ok(Json(member))
}

#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = MemberDraft,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid input or joining date in the future"),
        (status = 502, description = "Store rejected the member")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    Json(draft): Json<MemberDraft>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let created = state.services.members.create_member(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    request_body = MemberDraft,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(draft): Json<MemberDraft>,
) -> AppResult<Json<Member>> {
    let updated = state.services.members.update_member(id, draft).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(
        ("id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member and their lendings deleted", body = DeleteResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.members.delete_member(id).await?;
    Ok(Json(DeleteResponse::deleted(id)))
}
