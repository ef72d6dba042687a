//! Report title endpoints: listing by category and manual match edits

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    matching::{ActionKind, MatchAction},
    models::{MatchCategory, ReportTitle},
    services::review::{ReviewSummary, ReviewedTitle},
    AppState,
};

/// Query parameters for listing titles
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitlesQuery {
    /// Category to list (default: loaded)
    pub match_type: Option<MatchCategory>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitlesResponse {
    pub match_type: MatchCategory,
    pub count: usize,
    pub titles: Vec<ReviewedTitle>,
}

#[derive(Serialize, ToSchema)]
pub struct LoadMoreResponse {
    /// Number of titles appended
    pub added: usize,
}

#[derive(Serialize, ToSchema)]
pub struct ActionsResponse {
    pub actions: Vec<ActionKind>,
}

/// Manual match edit request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub action: ActionKind,
    /// Required for `assign`
    #[validate(length(min = 1, message = "kbTitleId cannot be empty"))]
    pub kb_title_id: Option<String>,
    /// Required for `assign`
    #[validate(length(min = 1, message = "kbTitleName cannot be empty"))]
    pub kb_title_name: Option<String>,
}

impl EditRequest {
    fn into_action(self) -> AppResult<MatchAction> {
        match self.action {
            ActionKind::Assign => match (self.kb_title_id, self.kb_title_name) {
                (Some(kb_title_id), Some(kb_title_name)) => Ok(MatchAction::Assign {
                    kb_title_id,
                    kb_title_name,
                }),
                _ => Err(AppError::Validation(
                    "assign requires kbTitleId and kbTitleName".to_string(),
                )),
            },
            ActionKind::Ignore => Ok(MatchAction::Ignore),
            ActionKind::Unignore => Ok(MatchAction::Unignore),
        }
    }
}

/// List loaded titles of one category
#[utoipa::path(
    get,
    path = "/providers/{id}/titles",
    tag = "review",
    params(("id" = String, Path, description = "Usage data provider ID"), TitlesQuery),
    responses(
        (status = 200, description = "Titles in load order", body = TitlesResponse)
    )
)]
pub async fn list_titles(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TitlesQuery>,
) -> AppResult<Json<TitlesResponse>> {
    let match_type = query.match_type.unwrap_or(MatchCategory::Loaded);
    let titles = state.services.review.titles(&id, match_type).await?;
    Ok(Json(TitlesResponse {
        match_type,
        count: titles.len(),
        titles,
    }))
}

/// Reload the provider's titles from eusage-reports
#[utoipa::path(
    post,
    path = "/providers/{id}/titles/load",
    tag = "review",
    params(("id" = String, Path, description = "Usage data provider ID")),
    responses(
        (status = 200, description = "Titles reloaded", body = ReviewSummary)
    )
)]
pub async fn load_titles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReviewSummary>> {
    state.services.review.load(&id).await?;
    Ok(Json(state.services.review.summary(&id).await?))
}

/// Load the next page of titles
#[utoipa::path(
    post,
    path = "/providers/{id}/titles/more",
    tag = "review",
    params(("id" = String, Path, description = "Usage data provider ID")),
    responses(
        (status = 200, description = "Next page appended", body = LoadMoreResponse)
    )
)]
pub async fn load_more_titles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LoadMoreResponse>> {
    let added = state.services.review.load_more(&id).await?;
    Ok(Json(LoadMoreResponse { added }))
}

/// Actions currently available for a title
#[utoipa::path(
    get,
    path = "/providers/{id}/titles/{title_id}/actions",
    tag = "review",
    params(
        ("id" = String, Path, description = "Usage data provider ID"),
        ("title_id" = String, Path, description = "Report title ID")
    ),
    responses(
        (status = 200, description = "Legal actions", body = ActionsResponse)
    )
)]
pub async fn list_actions(
    State(state): State<AppState>,
    Path((id, title_id)): Path<(String, String)>,
) -> AppResult<Json<ActionsResponse>> {
    let actions = state.services.review.legal_actions(&id, &title_id).await?;
    Ok(Json(ActionsResponse { actions }))
}

/// Assign, ignore or unignore a title's match
#[utoipa::path(
    post,
    path = "/providers/{id}/titles/{title_id}/actions",
    tag = "review",
    params(
        ("id" = String, Path, description = "Usage data provider ID"),
        ("title_id" = String, Path, description = "Report title ID")
    ),
    request_body = EditRequest,
    responses(
        (status = 200, description = "Edit saved", body = ReportTitle),
        (status = 409, description = "Action not available in the title's state", body = crate::error::ErrorResponse),
        (status = 502, description = "eusage-reports rejected the edit", body = crate::error::ErrorResponse)
    )
)]
pub async fn apply_action(
    State(state): State<AppState>,
    Path((id, title_id)): Path<(String, String)>,
    Json(request): Json<EditRequest>,
) -> AppResult<Json<ReportTitle>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let action = request.into_action()?;
    let title = state.services.review.apply_edit(&id, &title_id, action).await?;
    Ok(Json(title))
}
