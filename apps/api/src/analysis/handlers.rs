//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::report::AnalysisResult;
use crate::analysis::taxonomy::RoleProfile;
use crate::errors::AppError;
use crate::state::AppState;

/// Role used when the upload form omits one.
pub const DEFAULT_ROLE: &str = "Frontend Developer";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<RoleProfile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
/// POST /api/v1/analyze
///
/// Multipart form: `file` (the document) and optional `role`.
/// Analysis is CPU-bound, so it runs on the blocking pool.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut document: Option<(String, Bytes)> = None;
    let mut role: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Malformed upload", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error("Invalid file", e))?;
                document = Some((filename, data));
            }
            Some("role") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| upload_error("Invalid role", e))?;
                role = Some(value);
            }
            _ => {}
        }
    }

    let (filename, data) =
        document.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    let role = role
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    info!(file = %filename, size = data.len(), role = %role, "Analyzing upload");

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.analyze(&data, &role))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    Ok(Json(result))
}

/// Bodies over `DefaultBodyLimit` surface as multipart read errors; keep their 413.
fn upload_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", err.body_text()))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// GET /api/v1/roles
///
/// Every role with its required skills, in taxonomy order.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.engine.taxonomy().roles().to_vec(),
    })
}

/// GET /api/v1/roles/:name
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoleProfile>, AppError> {
    state
        .engine
        .taxonomy()
        .role(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Role '{name}' not found")))
}
