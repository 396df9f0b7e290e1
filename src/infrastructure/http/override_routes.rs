//! Game master override routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::{
    OverridePromptDto, OverrideStatusDto, PromptSubmission, SetOverrideRequestDto,
    SubmissionResultDto,
};
use crate::application::services::OverrideControlService;
use crate::infrastructure::http::auth::GameMaster;
use crate::infrastructure::state::AppState;

type ApiError = (StatusCode, String);

fn control(state: &AppState) -> Result<&OverrideControlService, ApiError> {
    state.override_control.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "d20 override is not available".to_string(),
        )
    })
}

pub async fn get_override(
    State(state): State<Arc<AppState>>,
    _gm: GameMaster,
) -> Result<Json<OverrideStatusDto>, ApiError> {
    Ok(Json(control(&state)?.status().await))
}

pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    _gm: GameMaster,
) -> Result<Json<OverridePromptDto>, ApiError> {
    Ok(Json(control(&state)?.prompt().await))
}

pub async fn submit_prompt(
    State(state): State<Arc<AppState>>,
    _gm: GameMaster,
    Json(submission): Json<PromptSubmission>,
) -> Result<Json<SubmissionResultDto>, ApiError> {
    control(&state)?
        .submit(submission)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn set_override(
    State(state): State<Arc<AppState>>,
    _gm: GameMaster,
    Json(req): Json<SetOverrideRequestDto>,
) -> Result<Json<SubmissionResultDto>, ApiError> {
    let value = control(&state)?
        .apply(&req.value)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(Json(SubmissionResultDto::stored(value)))
}

pub async fn reset_override(
    State(state): State<Arc<AppState>>,
    _gm: GameMaster,
) -> Result<Json<SubmissionResultDto>, ApiError> {
    control(&state)?
        .submit(PromptSubmission::Reset)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
