//! Usage report endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{ReqsByPubYearQuery, UseOverTimeQuery},
    reports::{PublicationYearChart, UseOverTimeTable},
    AppState,
};

/// Use-over-time table for an agreement
#[utoipa::path(
    get,
    path = "/agreements/{id}/use-over-time",
    tag = "reports",
    params(("id" = String, Path, description = "Agreement ID"), UseOverTimeQuery),
    responses(
        (status = 200, description = "Requests per period", body = UseOverTimeTable)
    )
)]
pub async fn use_over_time(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UseOverTimeQuery>,
) -> AppResult<Json<UseOverTimeTable>> {
    let table = state.services.reports.use_over_time(&id, &query).await?;
    Ok(Json(table))
}

/// Requests per publication year, one stacked series per year bucket
#[utoipa::path(
    get,
    path = "/agreements/{id}/reqs-by-pub-year",
    tag = "reports",
    params(("id" = String, Path, description = "Agreement ID"), ReqsByPubYearQuery),
    responses(
        (status = 200, description = "Requests per publication year and period", body = PublicationYearChart),
        (status = 400, description = "Invalid date range", body = crate::error::ErrorResponse)
    )
)]
pub async fn reqs_by_pub_year(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ReqsByPubYearQuery>,
) -> AppResult<Json<PublicationYearChart>> {
    let chart = state
        .services
        .reports
        .requests_by_publication_year(&id, &query)
        .await?;
    Ok(Json(chart))
}
