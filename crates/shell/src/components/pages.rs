//! Page template structs.

use askama::Template;
use askama_web::WebTemplate;

use crate::boundary::CapturedFault;
use crate::composer::ViewTree;
use crate::filters;
use crate::shell::toasts::Toast;

/// Login page.
#[derive(Debug, Default, Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginPage {
    /// Message shown when a login was rejected.
    pub error: Option<String>,
    /// Email to pre-fill after a rejected login.
    pub email: String,
    pub dark_mode: bool,
}

impl LoginPage {
    /// The page shown after the identity collaborator rejects a login.
    #[must_use]
    pub fn rejected(email: String) -> Self {
        Self {
            error: Some("We couldn't sign you in with that email.".to_string()),
            email,
            dark_mode: false,
        }
    }
}

/// A composed dashboard with the session's toasts.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage<'a> {
    pub view: &'a ViewTree,
    pub toasts: &'a [Toast],
    pub dark_mode: bool,
    /// Path form actions redirect back to.
    pub return_to: &'a str,
}

/// Generic error panel shown while the crash boundary is faulted.
#[derive(Template)]
#[template(path = "fallback.html")]
pub struct FallbackPage<'a> {
    /// Raw error and component stack. Only set in development.
    pub detail: Option<&'a CapturedFault>,
    pub dark_mode: bool,
    pub return_to: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn fault() -> CapturedFault {
        CapturedFault {
            message: "section users failed to render: table unavailable".to_string(),
            component_stack: "Shell > AdminDashboard > Section(users)".to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn test_login_page_shows_rejection() {
        let html = LoginPage::rejected("nobody@dealer.example".to_string())
            .render()
            .unwrap();
        assert!(html.contains("couldn"));
        assert!(html.contains("value=\"nobody@dealer.example\""));
    }

    #[test]
    fn test_production_fallback_hides_detail() {
        let html = FallbackPage {
            detail: None,
            dark_mode: true,
            return_to: "/admin/users",
        }
        .render()
        .unwrap();
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("Section(users)"));
        assert!(html.contains("class=\"dark\""));
    }

    #[test]
    fn test_development_fallback_shows_stack() {
        let fault = fault();
        let html = FallbackPage {
            detail: Some(&fault),
            dark_mode: false,
            return_to: "/admin/users",
        }
        .render()
        .unwrap();
        assert!(html.contains("fault-detail"));
        assert!(html.contains("Shell &#62; AdminDashboard &#62; Section(users)"));
        assert!(html.contains("table unavailable"));
    }
}
