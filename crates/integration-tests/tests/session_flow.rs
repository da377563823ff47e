//! Sign-in, dashboard and sign-out through the full router.

use axum::http::StatusCode;
use dealerdesk_integration_tests::TestApp;

#[tokio::test]
async fn test_health_endpoints() {
    let mut app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");

    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_root_redirects_to_login() {
    let mut app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_anonymous_dashboard_redirects_to_login() {
    let mut app = TestApp::new();
    for path in ["/admin", "/purchase/notes", "/sales/customers", "/delivery"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.location(), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_login_page_renders() {
    let mut app = TestApp::new();
    let response = app.get("/login").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("action=\"/login\""));
}

#[tokio::test]
async fn test_login_lands_on_role_home_with_welcome_toast() {
    let mut app = TestApp::new();

    let response = app.login("sales@dealer.example").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/sales"));
    assert!(app.has_session_cookie());

    let response = app.get("/sales").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("data-dashboard=\"SalesDashboard\""));
    assert!(response.body.contains("toast-success"));
    assert!(response.body.contains("Welcome back, Sam Ortiz"));
}

#[tokio::test]
async fn test_every_role_reaches_its_dashboard() {
    let cases = [
        ("admin@dealer.example", "/admin", "AdminDashboard"),
        ("purchase@dealer.example", "/purchase", "PurchaseDashboard"),
        ("sales@dealer.example", "/sales", "SalesDashboard"),
        ("delivery@dealer.example", "/delivery", "DeliveryDashboard"),
    ];
    let app = TestApp::new();

    for (email, home, dashboard) in cases {
        let mut browser = app.fresh_browser();
        let response = browser.login(email).await;
        assert_eq!(response.location(), Some(home));

        let response = browser.get(home).await;
        assert_eq!(response.status, StatusCode::OK, "{email}");
        assert!(
            response.body.contains(&format!("data-dashboard=\"{dashboard}\"")),
            "{email}"
        );
        assert!(response.body.contains("data-slot=\"overview\""), "{email}");
    }
}

#[tokio::test]
async fn test_signed_in_login_page_redirects_home() {
    let mut app = TestApp::new();
    app.login("delivery@dealer.example").await;

    let response = app.get("/login").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/delivery"));
}

#[tokio::test]
async fn test_unknown_operator_is_rejected() {
    let mut app = TestApp::new();

    let response = app.login("ghost@dealer.example").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("sign you in with that email"));
    assert!(response.body.contains("value=\"ghost@dealer.example\""));

    let response = app.get("/admin").await;
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let mut app = TestApp::new();
    app.login("purchase@dealer.example").await;
    assert_eq!(app.get("/purchase").await.status, StatusCode::OK);

    let response = app.logout().await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));

    let response = app.get("/purchase").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_display_mode_persists_across_logins() {
    let mut app = TestApp::new();
    app.login("delivery@dealer.example").await;

    let response = app
        .post_form("/shell/display-mode", "return_to=%2Fdelivery%2Fpending")
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/delivery/pending"));

    let response = app.get("/delivery/pending").await;
    assert!(response.body.contains("class=\"dark\""));

    app.logout().await;
    app.login("delivery@dealer.example").await;
    let response = app.get("/delivery").await;
    assert!(response.body.contains("class=\"dark\""));
}

#[tokio::test]
async fn test_form_actions_ignore_foreign_return_targets() {
    let mut app = TestApp::new();
    app.login("sales@dealer.example").await;

    let response = app
        .post_form("/shell/display-mode", "return_to=https%3A%2F%2Fevil.example")
        .await;
    assert_eq!(response.location(), Some("/sales"));
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let mut app = TestApp::new();
    let response = app.get("/static/shell.css").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let mut app = TestApp::new();
    let response = app.get("/health").await;
    assert!(response.headers.contains_key("x-request-id"));
}
