//! Onboarding handlers — status, step submission, explicit completion.

use axum::Json;
use axum::extract::State;

use jeton_entity::onboarding::OnboardingStatus;

use crate::dto::request::StepRequest;
use crate::dto::response::{ApiResponse, MessageResponse, StepResponse};
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// GET /api/onboarding/status
pub async fn status(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<OnboardingStatus>>, ApiError> {
    let status = state.policy.get_onboarding_status(session.user_id).await?;
    Ok(Json(ApiResponse::ok(status)))
}

/// POST /api/onboarding/step
///
/// Idempotent upsert; submitting `review_confirm` also attempts the final
/// completion check, whose failure does not fail this request — the client
/// retries through `POST /api/onboarding/complete`.
pub async fn submit_step(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(req): Json<StepRequest>,
) -> Result<Json<ApiResponse<StepResponse>>, ApiError> {
    let step = state
        .policy
        .update_step(session.user_id, req.step, req.data)
        .await?;

    Ok(Json(ApiResponse::ok(StepResponse {
        step: step.step_name,
        status: step.status,
        updated_at: step.updated_at,
    })))
}

/// POST /api/onboarding/complete
pub async fn complete(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.policy.mark_onboarding_complete(session.user_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Onboarding complete".to_string(),
    })))
}
