//! Login and logout.
//!
//! Credentials are not checked here: the identity collaborator resolves the
//! submitted email, and a rejection simply re-renders the login page.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use dealerdesk_core::ToastSeverity;

use crate::components::LoginPage;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{LOGIN_PATH, OptionalSession};
use crate::models::session_keys;
use crate::services::{LoginRequest, SessionStore};
use crate::shell::ShellId;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

/// GET /
async fn root() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

/// Render the login page. Signed-in operators go straight to their home.
///
/// GET /login
async fn login_page(OptionalSession { auth, .. }: OptionalSession) -> Response {
    match auth.identity {
        Some(identity) => Redirect::to(&identity.role.home_path()).into_response(),
        None => LoginPage::default().into_response(),
    }
}

/// Resolve the operator, start the session lifecycle and mount a shell.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    OptionalSession { session, .. }: OptionalSession,
    Form(request): Form<LoginRequest>,
) -> Result<Response, AppError> {
    let identity = match state.identities().resolve(&request) {
        Ok(identity) => identity,
        Err(error) => {
            tracing::info!(%error, "Login rejected");
            return Ok((StatusCode::UNAUTHORIZED, LoginPage::rejected(request.email)).into_response());
        }
    };

    // A previous login's shell must not outlive its session.
    if let Some(previous) = session.get::<ShellId>(session_keys::SHELL_ID).await? {
        state.shells().unmount(previous).await;
    }

    SessionStore::new(&session).login(&identity).await?;
    let (shell_id, shell) = state.shells().mount(identity.clone()).await;
    session.insert(session_keys::SHELL_ID, shell_id).await?;

    shell.lock().await.show_toast(
        format!("Welcome back, {}", identity.name),
        ToastSeverity::Success,
    );
    set_sentry_user(&identity);

    Ok(Redirect::to(&identity.role.home_path()).into_response())
}

/// Unmount the shell and clear the session.
///
/// POST /logout
#[instrument(skip_all)]
async fn logout(
    State(state): State<AppState>,
    OptionalSession { session, auth }: OptionalSession,
) -> Result<Redirect, AppError> {
    if let Some(shell_id) = session.get::<ShellId>(session_keys::SHELL_ID).await? {
        state.shells().unmount(shell_id).await;
    }
    SessionStore::new(&session).logout().await?;
    clear_sentry_user();

    if let Some(identity) = auth.identity {
        tracing::info!(operator_id = %identity.id, "Operator logged out");
    }
    Ok(Redirect::to(LOGIN_PATH))
}
