//! Access-check handlers.

use axum::Json;
use axum::extract::State;

use jeton_auth::policy::DashboardAccess;
use jeton_entity::subscription::AccessStatus;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/access/dashboard
///
/// Reports whether the user may enter the dashboard and, when not, where
/// to send them instead.
pub async fn dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<DashboardAccess>>, ApiError> {
    let access = state.policy.can_access_dashboard(session.user_id).await?;
    Ok(Json(ApiResponse::ok(access)))
}

/// GET /api/access/plan
///
/// The user's current trial/subscription entitlement.
pub async fn plan(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<AccessStatus>>, ApiError> {
    let status = state.policy.has_active_access(session.user_id).await?;
    Ok(Json(ApiResponse::ok(status)))
}
