//! Recent reviewer notifications

use axum::{extract::State, Json};

use crate::{models::Notification, AppState};

/// Notifications raised by recent edits and match updates, oldest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    responses(
        (status = 200, description = "Recent notifications", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.services.callouts.recent())
}
