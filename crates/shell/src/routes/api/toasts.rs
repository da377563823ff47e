//! Toast channel API.

use axum::{
    Json, Router,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use dealerdesk_core::ToastSeverity;

use crate::error::AppError;
use crate::middleware::CurrentShell;
use crate::shell::toasts::Toast;
use crate::state::AppState;

/// Build the toasts router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/toasts", get(visible).post(show))
}

#[derive(Debug, Deserialize)]
pub struct ShowToast {
    pub message: String,
    #[serde(default)]
    pub severity: ToastSeverity,
}

/// GET /api/toasts
async fn visible(current: CurrentShell) -> Json<Vec<Toast>> {
    Json(current.shell.lock().await.toasts())
}

/// Show a toast. Fire-and-forget: nothing identifies the toast afterwards.
///
/// POST /api/toasts
///
/// # Errors
///
/// Returns 400 if the message is blank.
async fn show(current: CurrentShell, Json(toast): Json<ShowToast>) -> Result<StatusCode, AppError> {
    if toast.message.trim().is_empty() {
        return Err(AppError::BadRequest("toast message is required".to_string()));
    }
    current
        .shell
        .lock()
        .await
        .show_toast(toast.message, toast.severity);
    Ok(StatusCode::ACCEPTED)
}
