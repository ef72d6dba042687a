//! Bulk match update endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchesResponse {
    /// COUNTER report segment the update runs from
    pub counter_report_id: String,
    pub year_month: String,
}

/// Recompute matches from the provider's most recent title report.
///
/// Runs in the background; titles are reloaded once it finishes.
#[utoipa::path(
    post,
    path = "/providers/{id}/update-matches",
    tag = "review",
    params(("id" = String, Path, description = "Usage data provider ID")),
    responses(
        (status = 202, description = "Update requested", body = UpdateMatchesResponse),
        (status = 422, description = "No title-report segment to update from", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_matches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<UpdateMatchesResponse>)> {
    let review = state.services.review.clone();
    let provider_id = id.clone();

    let started = state
        .services
        .refresh
        .update_matches(&id, move |_| async move {
            if let Err(e) = review.load(&provider_id).await {
                tracing::warn!("Reloading titles for provider {} failed: {}", provider_id, e);
            }
        })
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(UpdateMatchesResponse {
            counter_report_id: started.segment.id,
            year_month: started.segment.year_month,
        }),
    ))
}
