//! Shell form actions.
//!
//! Every action mutates the session's shell and redirects back to the page
//! that submitted it.

use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::post,
};
use serde::Deserialize;
use tracing::instrument;

use dealerdesk_core::{Role, ToastSeverity};

use crate::middleware::CurrentShell;
use crate::state::AppState;

/// Build the shell action router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shell/display-mode", post(toggle_display_mode))
        .route("/shell/notifications", post(set_notification_panel))
        .route("/shell/recover", post(recover))
        .route("/shell/reload", post(reload))
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PanelForm {
    pub open: bool,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Local path to redirect to after an action, or the role's home.
///
/// Only same-origin absolute paths are accepted.
pub(crate) fn return_target(return_to: Option<&str>, role: Role) -> String {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => role.home_path(),
    }
}

/// POST /shell/display-mode
#[instrument(skip_all)]
async fn toggle_display_mode(current: CurrentShell, Form(form): Form<ReturnForm>) -> Redirect {
    let mut shell = current.shell.lock().await;
    if let Err(error) = shell.toggle_display_mode().await {
        tracing::warn!(%error, "Could not save display mode");
        shell.show_toast("Could not save your display preference", ToastSeverity::Error);
    }
    Redirect::to(&return_target(form.return_to.as_deref(), current.identity.role))
}

/// POST /shell/notifications
#[instrument(skip_all)]
async fn set_notification_panel(current: CurrentShell, Form(form): Form<PanelForm>) -> Redirect {
    tracing::debug!(open = form.open, "Notification panel toggled");
    current.shell.lock().await.set_notification_panel(form.open);
    Redirect::to(&return_target(form.return_to.as_deref(), current.identity.role))
}

/// Clear the crash boundary so the next render tries again.
///
/// POST /shell/recover
#[instrument(skip_all)]
async fn recover(current: CurrentShell, Form(form): Form<ReturnForm>) -> Redirect {
    {
        let mut shell = current.shell.lock().await;
        shell.reset_boundary();
        shell.show_toast("Trying that again", ToastSeverity::Info);
    }
    Redirect::to(&return_target(form.return_to.as_deref(), current.identity.role))
}

/// Discard the mounted shell and mount a fresh one.
///
/// POST /shell/reload
#[instrument(skip_all)]
async fn reload(
    State(state): State<AppState>,
    current: CurrentShell,
    Form(form): Form<ReturnForm>,
) -> Redirect {
    let CurrentShell {
        identity, shell_id, shell, ..
    } = current;
    drop(shell);

    let role = identity.role;
    let fresh = state.shells().remount(shell_id, identity).await;
    fresh
        .lock()
        .await
        .show_toast("Dashboard reloaded", ToastSeverity::Info);

    Redirect::to(&return_target(form.return_to.as_deref(), role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_target_accepts_local_paths() {
        assert_eq!(return_target(Some("/sales/records"), Role::Sales), "/sales/records");
    }

    #[test]
    fn test_return_target_rejects_foreign_paths() {
        assert_eq!(return_target(Some("https://evil.example"), Role::Sales), "/sales");
        assert_eq!(return_target(Some("//evil.example"), Role::Admin), "/admin");
        assert_eq!(return_target(Some("/\\evil.example"), Role::Admin), "/admin");
        assert_eq!(return_target(None, Role::Delivery), "/delivery");
    }
}
