//! Integration test harness for the Dealerdesk shell.
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`, using
//! the in-memory session and preference stores, and carries the session
//! cookie between requests like a browser would.
//!
//! ```rust,ignore
//! let mut app = TestApp::new();
//! let response = app.login("sales@dealer.example").await;
//! assert_eq!(response.location(), Some("/sales"));
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use tower::ServiceExt;

use dealerdesk_shell::app::app;
use dealerdesk_shell::config::ShellConfig;
use dealerdesk_shell::middleware::{SESSION_COOKIE_NAME, create_memory_session_layer};
use dealerdesk_shell::services::OperatorDirectory;
use dealerdesk_shell::state::AppState;

/// The bundled operator directory.
pub const OPERATORS: &str = include_str!("../../../operators.yaml");

/// Mark-read delay used by the harness, short enough to wait out in a test.
pub const TEST_MARK_READ_DELAY: Duration = Duration::from_millis(50);

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

/// One browser against one application instance.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the application with in-memory stores.
    ///
    /// # Panics
    ///
    /// Panics if the bundled operator directory is invalid.
    #[must_use]
    pub fn new() -> Self {
        let base_url = url::Url::parse("http://localhost:3000").expect("valid base url");
        let mut config = ShellConfig::development(base_url);
        config.mark_read_delay = TEST_MARK_READ_DELAY;

        let directory = OperatorDirectory::from_yaml_str(OPERATORS).expect("valid directory");
        let session_layer = create_memory_session_layer(&config);
        let state = AppState::new(config, None, Arc::new(directory));

        Self {
            router: app(state).layer(session_layer),
            cookie: None,
        }
    }

    /// A second browser against the same application instance.
    #[must_use]
    pub fn fresh_browser(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Whether the browser currently holds a session cookie.
    #[must_use]
    pub const fn has_session_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        self.send(
            Method::POST,
            path,
            Some(("application/x-www-form-urlencoded", form.to_string())),
        )
        .await
    }

    pub async fn post_json(&mut self, path: &str, json: &serde_json::Value) -> TestResponse {
        self.send(Method::POST, path, Some(("application/json", json.to_string())))
            .await
    }

    /// Submit the login form for `email`.
    pub async fn login(&mut self, email: &str) -> TestResponse {
        let form = format!("email={}", email.replace('@', "%40"));
        self.post_form("/login", &form).await
    }

    pub async fn logout(&mut self) -> TestResponse {
        self.post_form("/logout", "").await
    }

    /// Send a request, attaching and then updating the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(
        &mut self,
        method: Method,
        path: &str,
        body: Option<(&str, String)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some((content_type, body)) => builder
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.store_cookie(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default();
            let Some((name, token)) = pair.split_once('=') else {
                continue;
            };
            if name.trim() != SESSION_COOKIE_NAME {
                continue;
            }
            self.cookie = (!token.is_empty()).then(|| format!("{SESSION_COOKIE_NAME}={token}"));
        }
    }
}
