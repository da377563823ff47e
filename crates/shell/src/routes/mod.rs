//! HTTP route handlers for the shell.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database, when configured)
//!
//! # Auth
//! GET  /                           - Redirect to login
//! GET  /login                      - Login page
//! POST /login                      - Sign in and mount the shell
//! POST /logout                     - Unmount the shell and sign out
//!
//! # Shell actions (form posts, redirect back)
//! POST /shell/display-mode         - Toggle light/dark
//! POST /shell/notifications        - Open or close the notification panel
//! POST /shell/recover              - Reset a faulted crash boundary
//! POST /shell/reload               - Remount the shell
//!
//! # JSON API
//! GET  /api/shell                  - Shell snapshot
//! GET  /api/notifications          - Feed contents
//! POST /api/notifications          - Append a notification
//! POST /api/notifications/{id}/read
//! POST /api/notifications/panel    - Open or close the panel
//! GET  /api/toasts                 - Visible toasts
//! POST /api/toasts                 - Show a toast
//! POST /api/preferences/display-mode
//!
//! # Dashboards
//! GET  /{role}                     - Role dashboard
//! GET  /{role}/{section}           - Role dashboard with a section selected
//!
//! # Anything else
//! *    (unmatched)                 - Access gate, then 404
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod shell;

use axum::{
    Router,
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::error::AppError;
use crate::middleware::{AccessGate, OptionalSession};
use crate::state::AppState;

/// Build the complete route tree.
///
/// The dashboard router is merged last; its `/{role}` captures only match
/// paths no other router claims.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(auth::router())
        .merge(shell::router())
        .merge(api::router())
        .merge(dashboard::router())
        .fallback(unmatched)
}

/// Unmatched paths pass the access gate like any other route, so anonymous
/// browsers land on the login page. Signed-in operators get a 404.
async fn unmatched(
    OptionalSession { auth, .. }: OptionalSession,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let decision = AccessGate::decide(uri.path(), &auth);
    if decision.is_allowed() {
        AppError::NotFound(format!("no page at {}", uri.path())).into_response()
    } else {
        decision.into_response()
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 if a database is configured and not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
