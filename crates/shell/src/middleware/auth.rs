//! Access gate and session extractors.
//!
//! The gate decision is binary and recomputed on every request: a session
//! with an identity passes, anything else is sent to the login page (or gets
//! `401` on the JSON API). The gate does no role checks; route partitions are
//! enforced by the dashboard handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{AuthSession, Identity, session_keys};
use crate::services::SessionStore;
use crate::shell::{ShellHandle, ShellId};
use crate::state::AppState;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the wrapped view unchanged.
    Render,
    /// Send the browser to the login page.
    RedirectToLogin,
    /// Reject an API request.
    Unauthorized,
}

impl GateDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Render)
    }
}

impl IntoResponse for GateDecision {
    fn into_response(self) -> Response {
        match self {
            Self::Render => StatusCode::NO_CONTENT.into_response(),
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Guard for every protected view.
pub struct AccessGate;

impl AccessGate {
    /// Decide whether a request for `path` may proceed.
    #[must_use]
    pub fn decide(path: &str, session: &AuthSession) -> GateDecision {
        if session.is_authenticated() {
            GateDecision::Render
        } else if is_api_path(path) {
            GateDecision::Unauthorized
        } else {
            GateDecision::RedirectToLogin
        }
    }
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/")
}

fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()))
}

/// Extractor that requires an authenticated session.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireSession { identity, .. }: RequireSession) -> String {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct RequireSession {
    pub identity: Identity,
    pub session: Session,
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts).map_err(IntoResponse::into_response)?;
        let current = SessionStore::new(&session)
            .current()
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        match (AccessGate::decide(parts.uri.path(), &current), current.identity) {
            (GateDecision::Render, Some(identity)) => Ok(Self { identity, session }),
            (decision, _) => {
                tracing::debug!(path = %parts.uri.path(), ?decision, "Access gate rejected request");
                Err(decision.into_response())
            }
        }
    }
}

/// Extractor that reads the session without rejecting anonymous requests.
pub struct OptionalSession {
    pub auth: AuthSession,
    pub session: Session,
}

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let auth = SessionStore::new(&session).current().await?;
        Ok(Self { auth, session })
    }
}

/// Extractor for the authenticated session's mounted shell.
///
/// Passes the access gate first. A session whose shell is no longer mounted
/// (server restart, idle eviction) gets a fresh one under the same id.
pub struct CurrentShell {
    pub identity: Identity,
    pub session: Session,
    pub shell_id: ShellId,
    pub shell: ShellHandle,
}

impl FromRequestParts<AppState> for CurrentShell {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireSession { identity, session } =
            RequireSession::from_request_parts(parts, state).await?;

        let stored = session
            .get::<ShellId>(session_keys::SHELL_ID)
            .await
            .map_err(|e| AppError::from(e).into_response())?;
        let shell_id = match stored {
            Some(id) => id,
            None => {
                let id = ShellId::new();
                session
                    .insert(session_keys::SHELL_ID, id)
                    .await
                    .map_err(|e| AppError::from(e).into_response())?;
                id
            }
        };
        let shell = state.shells().attach(shell_id, identity.clone()).await;

        Ok(Self {
            identity,
            session,
            shell_id,
            shell,
        })
    }
}
