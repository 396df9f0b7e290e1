//! Override control service - the game master's side of the pending override
//!
//! Builds the prompt and toolbar models a front-end renders, turns raw prompt
//! input into a stored value and never touches a roll.

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::{
    ControlGroupDto, ControlToolDto, OverridePromptDto, OverrideStatusDto, PromptAction,
    PromptActionDto, PromptFieldDto, PromptSubmission, RequestingUser, SubmissionResultDto,
};
use crate::application::ports::outbound::OverrideStoreError;
use crate::application::services::PendingOverrideService;
use crate::domain::value_objects::{PendingOverride, MAX_OVERRIDE_FACE};

pub const OVERRIDE_TOOL_NAME: &str = "d20-override-tool";
const OVERRIDE_TOOL_ICON: &str = "fas fa-dice-d20";
const TOKEN_GROUP: &str = "token";

/// Interpret whatever the prompt field held.
///
/// Numbers and numeric strings go through [`PendingOverride::from_input`];
/// everything else (empty, text, booleans, null) clears the override.
pub fn parse_prompt_input(raw: &Value) -> PendingOverride {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map_or(PendingOverride::NONE, PendingOverride::from_input)
}

/// Toolbar title for the override tool.
pub fn tool_label(value: PendingOverride) -> String {
    if value.is_pending() {
        format!("Next d20: {}", value)
    } else {
        "Next d20".to_string()
    }
}

/// Groups every user sees, before any module adds its tools.
pub fn base_scene_controls() -> Vec<ControlGroupDto> {
    let tool = |name: &str, title: &str, icon: &str| ControlToolDto {
        name: name.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        button: false,
        visible: true,
    };

    vec![ControlGroupDto {
        name: TOKEN_GROUP.to_string(),
        title: "Token Controls".to_string(),
        icon: "fas fa-user-alt".to_string(),
        tools: vec![
            tool("select", "Select Tokens", "fas fa-expand"),
            tool("target", "Select Targets", "fas fa-bullseye"),
        ],
    }]
}

/// Add the override tool to the token group.
///
/// Repeated registration is a no-op, so a control refresh never shows two
/// buttons.
pub fn register_override_tool(
    groups: &mut [ControlGroupDto],
    value: PendingOverride,
    user: &RequestingUser,
) {
    let Some(group) = groups.iter_mut().find(|g| g.name == TOKEN_GROUP) else {
        return;
    };
    if group.tools.iter().any(|t| t.name == OVERRIDE_TOOL_NAME) {
        return;
    }

    group.tools.push(ControlToolDto {
        name: OVERRIDE_TOOL_NAME.to_string(),
        title: tool_label(value),
        icon: OVERRIDE_TOOL_ICON.to_string(),
        button: true,
        visible: user.is_game_master,
    });
}

pub struct OverrideControlService {
    overrides: Arc<PendingOverrideService>,
}

impl OverrideControlService {
    pub fn new(overrides: Arc<PendingOverrideService>) -> Self {
        Self { overrides }
    }

    pub async fn status(&self) -> OverrideStatusDto {
        let value = self.overrides.get().await;
        OverrideStatusDto {
            value: value.value(),
            label: tool_label(value),
        }
    }

    /// Prompt model, prefilled with the pending value.
    pub async fn prompt(&self) -> OverridePromptDto {
        let current = self.overrides.get().await;
        let action = |action, label: &str, default| PromptActionDto {
            action,
            label: label.to_string(),
            default,
        };

        OverridePromptDto {
            title: "Choose the next d20 value".to_string(),
            field: PromptFieldDto {
                name: "value".to_string(),
                label: "Next d20 result".to_string(),
                min: 1,
                max: MAX_OVERRIDE_FACE,
                step: 1,
                value: current.value(),
            },
            hint: "0 or empty clears the override".to_string(),
            actions: vec![
                action(PromptAction::Apply, "Apply", true),
                action(PromptAction::Reset, "Reset", false),
                action(PromptAction::Cancel, "Cancel", false),
            ],
        }
    }

    pub async fn submit(
        &self,
        submission: PromptSubmission,
    ) -> Result<SubmissionResultDto, OverrideStoreError> {
        match submission {
            PromptSubmission::Apply { value } => {
                self.apply(&value).await.map(SubmissionResultDto::stored)
            }
            PromptSubmission::Reset => {
                self.overrides.reset().await?;
                Ok(SubmissionResultDto::stored(PendingOverride::NONE))
            }
            PromptSubmission::Cancel => Ok(SubmissionResultDto::cancelled()),
        }
    }

    /// Clamp raw input and store it, returning what was stored.
    pub async fn apply(&self, raw: &Value) -> Result<PendingOverride, OverrideStoreError> {
        let value = parse_prompt_input(raw);
        self.overrides.set(value).await?;
        Ok(value)
    }

    /// Scene controls for `user`, including the override tool.
    pub async fn scene_controls(&self, user: &RequestingUser) -> Vec<ControlGroupDto> {
        let mut groups = base_scene_controls();
        let value = if user.is_game_master {
            self.overrides.get().await
        } else {
            PendingOverride::NONE
        };
        register_override_tool(&mut groups, value, user);
        groups
    }
}
