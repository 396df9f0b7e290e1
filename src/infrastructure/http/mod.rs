//! HTTP REST API routes

pub mod auth;
mod control_routes;
mod override_routes;
mod roll_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Override routes (game master only)
        .route(
            "/api/override",
            get(override_routes::get_override).put(override_routes::set_override),
        )
        .route(
            "/api/override/prompt",
            get(override_routes::get_prompt).post(override_routes::submit_prompt),
        )
        .route("/api/override/reset", post(override_routes::reset_override))
        // Scene controls
        .route("/api/controls", get(control_routes::get_scene_controls))
        // Rolls
        .route("/api/rolls", post(roll_routes::create_roll))
}
