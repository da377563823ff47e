//! Role dashboards.
//!
//! `/{role}` and `/{role}/{section}` pass the access gate, then check the
//! operator's role against the route's partition before rendering the
//! session's shell through the crash boundary.

use axum::{
    Router,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::instrument;

use dealerdesk_core::Role;

use askama::Template;

use crate::boundary::{CapturedFault, Contained, RenderFault};
use crate::components::{DashboardPage, FallbackPage};
use crate::composer::partition;
use crate::error::AppError;
use crate::middleware::CurrentShell;
use crate::shell::Shell;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{role}", get(home))
        .route("/{role}/{section}", get(section))
}

/// Dashboard with the session's current section.
///
/// GET /{role}
#[instrument(skip(state, current, uri))]
async fn home(
    State(state): State<AppState>,
    Path(role): Path<String>,
    OriginalUri(uri): OriginalUri,
    current: CurrentShell,
) -> Result<Response, AppError> {
    let route_role = parse_role(&role)?;
    render_partition(&state, current, route_role, None, uri.path()).await
}

/// Dashboard with `section` selected.
///
/// GET /{role}/{section}
#[instrument(skip(state, current, uri))]
async fn section(
    State(state): State<AppState>,
    Path((role, section)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
    current: CurrentShell,
) -> Result<Response, AppError> {
    let route_role = parse_role(&role)?;
    render_partition(&state, current, route_role, Some(&section), uri.path()).await
}

fn parse_role(role: &str) -> Result<Role, AppError> {
    role.parse()
        .map_err(|_| AppError::NotFound(format!("no dashboard at /{role}")))
}

async fn render_partition(
    state: &AppState,
    current: CurrentShell,
    route_role: Role,
    section: Option<&str>,
    path: &str,
) -> Result<Response, AppError> {
    let session_role = current.identity.role;
    if !partition::admits(session_role, route_role, section) {
        tracing::info!(
            %session_role,
            %route_role,
            section,
            "Operator outside route partition, redirecting home"
        );
        return Ok(Redirect::to(&session_role.home_path()).into_response());
    }

    let mut shell = current.shell.lock().await;
    if let Some(section) = section {
        shell.select_section(state.composer(), section);
    }
    Ok(render_shell(state, &mut shell, path))
}

/// Render the shell's dashboard, or the fallback panel if the crash boundary
/// is (or becomes) faulted.
pub(crate) fn render_shell(state: &AppState, shell: &mut Shell, return_to: &str) -> Response {
    let toasts = shell.toasts();
    let dark_mode = shell.display_mode().is_dark();

    let outcome = shell.render_dashboard(state.composer(), state.diagnostics(), |view| {
        DashboardPage {
            view,
            toasts: &toasts,
            dark_mode,
            return_to,
        }
        .render()
        .map_err(RenderFault::from)
    });

    match outcome {
        Contained::Rendered(html) => Html(html).into_response(),
        Contained::Fallback(fault) => fallback_response(state, &fault, dark_mode, return_to),
    }
}

fn fallback_response(
    state: &AppState,
    fault: &CapturedFault,
    dark_mode: bool,
    return_to: &str,
) -> Response {
    let page = FallbackPage {
        detail: state.config().environment.is_development().then_some(fault),
        dark_mode,
        return_to,
    };
    match page.render() {
        Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
        Err(error) => {
            tracing::error!(%error, "Fallback page failed to render");
            (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use dealerdesk_core::{Email, OperatorId};

    use super::*;
    use crate::config::{Environment, ShellConfig};
    use crate::diagnostics::testing::RecordingSink;
    use crate::models::Identity;
    use crate::services::OperatorDirectory;
    use crate::shell::preferences::PreferenceStore;
    use crate::shell::{ShellHandle, ShellTimings};

    fn state(environment: Environment, sink: Arc<RecordingSink>) -> AppState {
        let mut config =
            ShellConfig::development(url::Url::parse("http://localhost:3000").unwrap());
        config.environment = environment;
        let identities = OperatorDirectory::from_identities([operator()]).unwrap();
        AppState::with_parts(
            config,
            None,
            Arc::new(identities),
            PreferenceStore::memory(),
            sink,
        )
    }

    fn operator() -> Identity {
        Identity {
            id: OperatorId::new(3),
            name: "Sam Ortiz".to_string(),
            email: Email::parse("sales@dealer.example").unwrap(),
            role: Role::Sales,
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn fault_boundary(state: &AppState, shell: &mut Shell) {
        let outcome = shell.render_dashboard(state.composer(), state.diagnostics(), |_| {
            Err::<(), _>(RenderFault::Section {
                section: "overview",
                reason: "ledger offline".to_string(),
            })
        });
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_faulted_shell_renders_generic_fallback_in_production() {
        let sink = Arc::new(RecordingSink::default());
        let state = state(Environment::Production, Arc::clone(&sink));
        let handle =
            ShellHandle::mount(operator(), PreferenceStore::memory(), ShellTimings::default())
                .await;
        let mut shell = handle.lock().await;

        fault_boundary(&state, &mut shell);
        assert_eq!(sink.count(), 1);

        let response = render_shell(&state, &mut shell, "/sales");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("fault-detail"));
        assert!(!html.contains("ledger offline"));
        assert!(!html.contains("data-dashboard"));
        // Skipped renders are not reported again.
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_development_fallback_carries_detail() {
        let sink = Arc::new(RecordingSink::default());
        let state = state(Environment::Development, sink);
        let handle =
            ShellHandle::mount(operator(), PreferenceStore::memory(), ShellTimings::default())
                .await;
        let mut shell = handle.lock().await;

        fault_boundary(&state, &mut shell);

        let html = body_text(render_shell(&state, &mut shell, "/sales")).await;
        assert!(html.contains("fault-detail"));
        assert!(html.contains("ledger offline"));
    }

    #[tokio::test]
    async fn test_reset_boundary_renders_dashboard_again() {
        let sink = Arc::new(RecordingSink::default());
        let state = state(Environment::Production, sink);
        let handle =
            ShellHandle::mount(operator(), PreferenceStore::memory(), ShellTimings::default())
                .await;
        let mut shell = handle.lock().await;

        fault_boundary(&state, &mut shell);
        assert_eq!(
            render_shell(&state, &mut shell, "/sales").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        shell.reset_boundary();
        let response = render_shell(&state, &mut shell, "/sales");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!shell.boundary().is_faulted());
        let html = body_text(response).await;
        assert!(html.contains("data-dashboard=\"SalesDashboard\""));
    }
}
