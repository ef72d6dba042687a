//! Provider review summary endpoint

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, services::review::ReviewSummary, AppState};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    /// Reload titles from eusage-reports first (default: false)
    pub reload: Option<bool>,
}

/// Match review summary of a usage data provider
#[utoipa::path(
    get,
    path = "/providers/{id}/summary",
    tag = "review",
    params(("id" = String, Path, description = "Usage data provider ID"), SummaryQuery),
    responses(
        (status = 200, description = "Counts per category and review status", body = ReviewSummary),
        (status = 404, description = "Unknown provider", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<ReviewSummary>> {
    if query.reload.unwrap_or(false) {
        state.services.review.load(&id).await?;
    }
    let summary = state.services.review.summary(&id).await?;
    Ok(Json(summary))
}
