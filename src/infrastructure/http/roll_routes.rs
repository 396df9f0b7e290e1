//! Roll routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::RollRequestDto;
use crate::domain::entities::RollResult;
use crate::infrastructure::state::AppState;

pub async fn create_roll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RollRequestDto>,
) -> Result<Json<RollResult>, (StatusCode, String)> {
    state
        .roll_service
        .roll(req)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}
