//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, notifications, providers, refresh, reports, titles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "eUsage Review API",
        version = "0.3.0",
        description = "Title-match review for eusage-reports",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Review
        providers::get_summary,
        titles::list_titles,
        titles::load_titles,
        titles::load_more_titles,
        titles::list_actions,
        titles::apply_action,
        refresh::update_matches,
        // Reports
        reports::use_over_time,
        reports::reqs_by_pub_year,
        // Notifications
        notifications::list_notifications,
    ),
    components(
        schemas(
            // Review
            crate::models::ReportTitle,
            crate::models::MatchStatus,
            crate::models::MatchCategory,
            crate::models::UsageDataProvider,
            crate::matching::ActionKind,
            crate::matching::ReviewStatus,
            crate::services::review::ReviewedTitle,
            crate::services::review::ReviewSummary,
            crate::services::review::CategorySummary,
            titles::TitlesResponse,
            titles::LoadMoreResponse,
            titles::ActionsResponse,
            titles::EditRequest,
            refresh::UpdateMatchesResponse,
            // Reports
            crate::models::UseOverTimeQuery,
            crate::reports::UseOverTimeTable,
            crate::reports::UseOverTimeRow,
            crate::models::CountType,
            crate::models::ReqsByPubYearQuery,
            crate::reports::PublicationYearChart,
            crate::reports::PublicationYearSeries,
            // Notifications
            crate::models::Notification,
            crate::models::NotificationKind,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "review", description = "Title-match review"),
        (name = "reports", description = "Usage reports"),
        (name = "notifications", description = "Reviewer notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
