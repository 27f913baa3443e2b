//! Overdue report endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{ListQuery, OverdueSort},
    services::overdue::OverdueReport,
    AppState,
};

/// Overdue lendings with fines; sorted by days overdue, longest first, by default
#[utoipa::path(
    get,
    path = "/overdue",
    tag = "overdue",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring filter"),
        ("sort" = Option<String>, Query, description = "days (default), fine or due_date"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<usize>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<usize>, Query, description = "Items per page (default: 5)")
    ),
    responses(
        (status = 200, description = "Overdue report for today", body = OverdueReport)
    )
)]
pub async fn overdue_report(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<OverdueSort>>,
) -> AppResult<Json<OverdueReport>> {
    let report = state.services.overdue.report(&query).await?;
    Ok(Json(report))
}
