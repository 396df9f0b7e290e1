//! Request identity extractors
//!
//! The requesting user comes from the `X-User-Id` header. Whether that user is
//! a game master is decided by configuration.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::application::dto::RequestingUser;
use crate::infrastructure::state::AppState;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Any identified user. Rejects with 401 when the header is missing.
#[derive(Debug, Clone)]
pub struct Requester(pub RequestingUser);

impl FromRequestParts<Arc<AppState>> for Requester {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Requester(RequestingUser {
            id: user_id.to_string(),
            is_game_master: state.config.is_game_master(user_id),
        }))
    }
}

/// A game master. Rejects with 401 without identity and 403 for anyone else.
#[derive(Debug, Clone)]
pub struct GameMaster(pub RequestingUser);

impl FromRequestParts<Arc<AppState>> for GameMaster {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Requester(user) = Requester::from_request_parts(parts, state).await?;
        if !user.is_game_master {
            tracing::debug!(user_id = %user.id, "Rejected override request from non-GM");
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(GameMaster(user))
    }
}
