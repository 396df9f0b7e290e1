//! Scene control routes

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::ControlGroupDto;
use crate::application::services::base_scene_controls;
use crate::infrastructure::http::auth::Requester;
use crate::infrastructure::state::AppState;

/// Toolbar groups for the requesting user
pub async fn get_scene_controls(
    State(state): State<Arc<AppState>>,
    Requester(user): Requester,
) -> Json<Vec<ControlGroupDto>> {
    let groups = match &state.override_control {
        Some(control) => control.scene_controls(&user).await,
        None => base_scene_controls(),
    };
    Json(groups)
}
