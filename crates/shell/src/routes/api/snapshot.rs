//! Shell state snapshot.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use dealerdesk_core::{OperatorId, Role};

use crate::boundary::BoundaryState;
use crate::middleware::CurrentShell;
use crate::state::AppState;

/// Build the snapshot router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/shell", get(snapshot))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSummary {
    pub id: OperatorId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundarySummary {
    pub faulted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Read-only view of the mounted shell.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub role: Role,
    pub operator: OperatorSummary,
    pub dark_mode: bool,
    pub active_section: String,
    pub unread_count: usize,
    pub panel_open: bool,
    pub toast_count: usize,
    pub boundary: BoundarySummary,
}

/// GET /api/shell
async fn snapshot(current: CurrentShell) -> Json<ShellSnapshot> {
    let shell = current.shell.lock().await;
    let boundary = match shell.boundary().state() {
        BoundaryState::Healthy => BoundarySummary {
            faulted: false,
            occurred_at: None,
        },
        BoundaryState::Faulted(fault) => BoundarySummary {
            faulted: true,
            occurred_at: Some(fault.occurred_at),
        },
    };

    Json(ShellSnapshot {
        role: shell.identity().role,
        operator: OperatorSummary {
            id: shell.identity().id,
            name: shell.identity().name.clone(),
        },
        dark_mode: shell.display_mode().is_dark(),
        active_section: shell.navigation().active_section_id().to_string(),
        unread_count: shell.unread_count(),
        panel_open: shell.is_panel_open(),
        toast_count: shell.toasts().len(),
        boundary,
    })
}
