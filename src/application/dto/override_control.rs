use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PendingOverride;

// ============================================================================
// Identity
// ============================================================================

/// The user behind a request, as resolved by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestingUser {
    pub id: String,
    pub is_game_master: bool,
}

// ============================================================================
// Override status and prompt
// ============================================================================

/// Current pending override and the label the toolbar shows for it
#[derive(Debug, Clone, Serialize)]
pub struct OverrideStatusDto {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptAction {
    Apply,
    Reset,
    Cancel,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptActionDto {
    pub action: PromptAction,
    pub label: String,
    pub default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptFieldDto {
    pub name: String,
    pub label: String,
    pub min: u8,
    pub max: u8,
    pub step: u8,
    pub value: u8,
}

/// Everything a front-end needs to render the override prompt
#[derive(Debug, Clone, Serialize)]
pub struct OverridePromptDto {
    pub title: String,
    pub field: PromptFieldDto,
    pub hint: String,
    pub actions: Vec<PromptActionDto>,
}

/// The button the game master pressed, with the raw field contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PromptSubmission {
    Apply {
        #[serde(default)]
        value: serde_json::Value,
    },
    Reset,
    Cancel,
}

/// Stored value after a submission, `None` when it was cancelled
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResultDto {
    pub value: Option<u8>,
}

impl SubmissionResultDto {
    pub fn stored(value: PendingOverride) -> Self {
        Self {
            value: Some(value.value()),
        }
    }

    pub fn cancelled() -> Self {
        Self { value: None }
    }
}

/// Shorthand body for `PUT /api/override`
#[derive(Debug, Clone, Deserialize)]
pub struct SetOverrideRequestDto {
    #[serde(default)]
    pub value: serde_json::Value,
}

// ============================================================================
// Scene controls
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlToolDto {
    pub name: String,
    pub title: String,
    pub icon: String,
    pub button: bool,
    pub visible: bool,
}

/// A toolbar group, e.g. the token controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlGroupDto {
    pub name: String,
    pub title: String,
    pub icon: String,
    pub tools: Vec<ControlToolDto>,
}
