//! Display preference API.

use axum::{Json, Router, routing::post};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::CurrentShell;
use crate::state::AppState;

/// Build the preferences router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/preferences/display-mode", post(toggle_display_mode))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModeResponse {
    pub dark_mode: bool,
}

/// Flip the display mode. The new value is persisted before it applies.
///
/// POST /api/preferences/display-mode
///
/// # Errors
///
/// Returns 500 if the preference cannot be saved.
#[instrument(skip_all)]
async fn toggle_display_mode(current: CurrentShell) -> Result<Json<DisplayModeResponse>, AppError> {
    let mode = current.shell.lock().await.toggle_display_mode().await?;
    Ok(Json(DisplayModeResponse {
        dark_mode: mode.is_dark(),
    }))
}
