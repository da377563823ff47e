//! Notification feed API.

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use dealerdesk_core::NotificationId;

use crate::error::AppError;
use crate::middleware::CurrentShell;
use crate::shell::notifications::{NewNotification, Notification};
use crate::state::AppState;

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", get(list).post(append))
        .route("/api/notifications/{id}/read", post(mark_read))
        .route("/api/notifications/panel", post(set_panel))
}

/// Feed contents, newest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub unread_count: usize,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub id: NotificationId,
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadResponse {
    pub unread_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PanelRequest {
    pub open: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelResponse {
    pub open: bool,
    pub sweep_pending: bool,
}

/// GET /api/notifications
async fn list(current: CurrentShell) -> Json<FeedResponse> {
    let shell = current.shell.lock().await;
    Json(FeedResponse {
        unread_count: shell.unread_count(),
        notifications: shell.feed().iter().cloned().collect(),
    })
}

/// Append a producer's notification.
///
/// POST /api/notifications
///
/// # Errors
///
/// Returns 400 if the title or message is blank.
#[instrument(skip_all)]
async fn append(
    current: CurrentShell,
    Json(notification): Json<NewNotification>,
) -> Result<(StatusCode, Json<AppendResponse>), AppError> {
    if notification.title.trim().is_empty() || notification.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "notification title and message are required".to_string(),
        ));
    }

    let mut shell = current.shell.lock().await;
    let id = shell.append_notification(notification);
    tracing::debug!(%id, "Notification appended");
    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            id,
            unread_count: shell.unread_count(),
        }),
    ))
}

/// POST /api/notifications/{id}/read
async fn mark_read(current: CurrentShell, Path(id): Path<NotificationId>) -> Json<UnreadResponse> {
    let mut shell = current.shell.lock().await;
    shell.mark_read(id);
    Json(UnreadResponse {
        unread_count: shell.unread_count(),
    })
}

/// POST /api/notifications/panel
async fn set_panel(current: CurrentShell, Json(request): Json<PanelRequest>) -> Json<PanelResponse> {
    let mut shell = current.shell.lock().await;
    shell.set_notification_panel(request.open);
    Json(PanelResponse {
        open: shell.is_panel_open(),
        sweep_pending: shell.is_sweep_pending(),
    })
}
