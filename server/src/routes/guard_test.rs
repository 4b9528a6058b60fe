use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{MockBackend, test_app_state};

fn app(backend: Arc<MockBackend>) -> Router {
    let state = test_app_state(backend);
    Router::new()
        .route("/", get(|| async { "page" }))
        .route("/{*path}", get(|| async { "page" }))
        .layer(middleware::from_fn_with_state(state, ssr_guard))
}

async fn get_page(backend: Arc<MockBackend>, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    app(backend).oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

fn location(response: &Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

#[test]
fn needs_user_only_for_login_and_protected_paths() {
    assert!(needs_user("/login"));
    assert!(needs_user("/login/"));
    assert!(needs_user("/dashboard"));
    assert!(needs_user("/admin/users"));
    assert!(!needs_user("/"));
    assert!(!needs_user("/register"));
    assert!(!needs_user("/unauthorized"));
}

#[tokio::test]
async fn public_page_skips_user_lookup() {
    let backend = Arc::new(MockBackend::default());
    let response = get_page(backend.clone(), "/register", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend.seen_cookies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_on_protected_page_redirects_to_login_with_from() {
    let response = get_page(Arc::new(MockBackend::default()), "/admin/users?page=2", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?from=%2Fadmin%2Fusers%3Fpage%3D2");
}

#[tokio::test]
async fn cookie_is_forwarded_to_the_status_lookup() {
    let backend = Arc::new(MockBackend::signed_in("teacher"));
    let response = get_page(backend.clone(), "/teacher", Some("sessionid=abc")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.seen_cookies.lock().unwrap().as_slice(), [Some("sessionid=abc".to_owned())]);
}

#[tokio::test]
async fn role_mismatch_redirects_to_unauthorized() {
    let response = get_page(Arc::new(MockBackend::signed_in("student")), "/admin", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/unauthorized");
}

#[tokio::test]
async fn signed_in_on_login_goes_to_sanitized_from() {
    let backend = Arc::new(MockBackend::signed_in("teacher"));
    let response = get_page(backend.clone(), "/login?from=%2Fteacher", None).await;
    assert_eq!(location(&response), "/teacher");

    let response = get_page(backend, "/login?from=https%3A%2F%2Fevil.example", None).await;
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn control_characters_in_from_go_to_dashboard() {
    let backend = Arc::new(MockBackend::signed_in("teacher"));
    for from in ["%2F%09%2Fevil.example", "%2F%0A%2Fevil.example", "%2F%0D%2Fevil.example"] {
        let response = get_page(backend.clone(), &format!("/login?from={from}"), None).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{from}");
        assert_eq!(location(&response), "/dashboard", "{from}");
    }
}

#[test]
fn found_falls_back_when_target_is_not_a_header_value() {
    let response = found("/\n/evil.example");
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/dashboard");

    assert_eq!(location(&found("/teacher?tab=1")), "/teacher?tab=1");
}

#[tokio::test]
async fn anonymous_on_login_renders_the_page() {
    let response = get_page(Arc::new(MockBackend::default()), "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn lookup_failure_counts_as_anonymous() {
    let response = get_page(Arc::new(MockBackend::unreachable()), "/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login?from=%2Fdashboard");
}
