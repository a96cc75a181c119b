//! Axum route handlers for the Template API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::personal_info::PersonalInfo;
use crate::models::style_option::StyleOption;
use crate::state::AppState;
use crate::template::render::{render_content, render_personal_info};
use crate::template::repair::RepairPath;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub html: String,
    #[serde(default)]
    pub expect_content_placeholder: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub violations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepairRequest {
    pub html: String,
    /// Plain-text resume body, used only if the document must be rebuilt.
    #[serde(default)]
    pub fallback_content: String,
    #[serde(default)]
    pub expect_content_placeholder: bool,
}

#[derive(Debug, Serialize)]
pub struct RepairResponse {
    pub html: String,
    pub path: RepairPath,
    pub violations_before: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepairOptionsRequest {
    pub options: Vec<StyleOption>,
    #[serde(default)]
    pub fallback_content: String,
    #[serde(default)]
    pub expect_content_placeholder: bool,
}

#[derive(Debug, Serialize)]
pub struct RepairOptionsResponse {
    pub options: Vec<StyleOption>,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub html: String,
    pub personal_info: PersonalInfo,
    /// Pre-rendered resume body HTML for the optional content slot.
    pub resume_content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/templates/validate
///
/// Structural validation only — the validate-then-reject policy. Useful for
/// previewing why a generated template would be repaired.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Json<ValidateResponse> {
    let result = state
        .repair
        .validate(&request.html, request.expect_content_placeholder);

    Json(ValidateResponse {
        valid: result.valid,
        violations: result.descriptions(),
    })
}

/// POST /api/v1/templates/repair
///
/// Full pipeline: severity check → complete or patch → transforms. Always
/// returns a renderable document, however malformed the input.
pub async fn handle_repair(
    State(state): State<AppState>,
    Json(request): Json<RepairRequest>,
) -> Json<RepairResponse> {
    let outcome = state.repair.repair(
        &request.html,
        &request.fallback_content,
        request.expect_content_placeholder,
    );

    Json(RepairResponse {
        html: outcome.html,
        path: outcome.path,
        violations_before: outcome
            .violations_before
            .iter()
            .map(|v| v.to_string())
            .collect(),
    })
}

/// POST /api/v1/templates/repair-options
///
/// Batch repair of generated style options, processed sequentially in the
/// order received.
pub async fn handle_repair_options(
    State(state): State<AppState>,
    Json(request): Json<RepairOptionsRequest>,
) -> Result<Json<RepairOptionsResponse>, AppError> {
    if request.options.is_empty() {
        return Err(AppError::Validation("options cannot be empty".to_string()));
    }

    let options = state.repair.repair_options(
        request.options,
        &request.fallback_content,
        request.expect_content_placeholder,
    );

    Ok(Json(RepairOptionsResponse { options }))
}

/// POST /api/v1/templates/render
///
/// Substitutes the placeholder tokens with real values. The template should
/// have been repaired first; substitution on an unrepaired document is
/// permitted but may leave markers behind.
pub async fn handle_render(
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    if request.html.trim().is_empty() {
        return Err(AppError::Validation("html cannot be empty".to_string()));
    }

    let mut html = render_personal_info(&request.html, &request.personal_info);
    if let Some(content) = &request.resume_content {
        html = render_content(&html, content);
    }

    Ok(Json(RenderResponse { html }))
}
