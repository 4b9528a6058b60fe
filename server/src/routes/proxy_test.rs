use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::routing::any;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::{MockBackend, test_app_state};

// =============================================================
// rewrite_set_cookie
// =============================================================

fn rewritten(raw: &str, cookie_secure: bool) -> Cookie<'static> {
    Cookie::parse(rewrite_set_cookie(raw, cookie_secure).expect("cookie")).expect("reparse")
}

#[test]
fn rewrite_drops_domain_and_forces_path_and_samesite() {
    let cookie = rewritten("sessionid=abc; Domain=api.eduvault.test; Path=/api; HttpOnly; SameSite=None; Max-Age=3600", false);
    assert_eq!(cookie.name_value(), ("sessionid", "abc"));
    assert_eq!(cookie.domain(), None);
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(3600));
}

#[test]
fn rewrite_drops_secure_unless_configured() {
    let raw = "csrftoken=t; Secure; Path=/";
    assert_eq!(rewritten(raw, false).secure(), None);
    assert_eq!(rewritten(raw, true).secure(), Some(true));
}

#[test]
fn rewrite_never_adds_secure_that_was_absent() {
    assert_eq!(rewritten("a=1", true).secure(), None);
}

#[test]
fn rewrite_keeps_expiry_of_deletion_cookies() {
    let cookie = rewritten("sessionid=; expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; Path=/", false);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    assert!(cookie.expires_datetime().is_some());
}

#[test]
fn rewrite_rejects_non_cookie() {
    assert_eq!(rewrite_set_cookie("no-equals-sign", false), None);
}

// =============================================================
// header filtering
// =============================================================

#[test]
fn upstream_headers_strip_hop_by_hop_and_host() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    incoming.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    incoming.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    incoming.insert(header::COOKIE, HeaderValue::from_static("sessionid=abc"));
    incoming.insert("x-csrftoken", HeaderValue::from_static("tok"));

    let out = upstream_headers(&incoming);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::COOKIE).unwrap(), "sessionid=abc");
    assert_eq!(out.get("x-csrftoken").unwrap(), "tok");
}

#[test]
fn downstream_headers_rewrite_every_set_cookie() {
    let mut upstream = HeaderMap::new();
    upstream.append(header::SET_COOKIE, HeaderValue::from_static("sessionid=abc; Domain=x; Secure"));
    upstream.append(header::SET_COOKIE, HeaderValue::from_static("csrftoken=t; Path=/api"));
    upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    upstream.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let out = downstream_headers(&upstream, false);
    let cookies: Vec<_> =
        out.get_all(header::SET_COOKIE).iter().map(|v| Cookie::parse(v.to_str().unwrap().to_owned()).unwrap()).collect();
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert_eq!((cookie.domain(), cookie.path(), cookie.secure()), (None, Some("/"), None));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }
    assert_eq!(cookies[1].name(), "csrftoken");
    assert!(out.get(header::TRANSFER_ENCODING).is_none());
    assert_eq!(out.get(header::CONTENT_TYPE).unwrap(), "application/json");
}

// =============================================================
// forward handler
// =============================================================

fn app(backend: Arc<MockBackend>) -> Router {
    Router::new().route("/api/{*rest}", any(forward)).with_state(test_app_state(backend))
}

#[tokio::test]
async fn forward_passes_method_query_headers_and_body() {
    let backend = Arc::new(MockBackend::default());
    let response = app(backend.clone())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v2/auth/login/?next=1")
                .header(header::COOKIE, "csrftoken=t")
                .header("x-csrftoken", "t")
                .body(Body::from(r#"{"identifier":"a"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let forwarded = backend.forwarded.lock().unwrap();
    let request = &forwarded[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path_and_query, "/api/v2/auth/login/?next=1");
    assert_eq!(request.headers.get("x-csrftoken").unwrap(), "t");
    assert_eq!(&request.body[..], br#"{"identifier":"a"}"#);
}

#[tokio::test]
async fn forward_rewrites_backend_cookies() {
    let mut backend = MockBackend::default();
    backend
        .response_headers
        .append(header::SET_COOKIE, HeaderValue::from_static("sessionid=abc; Domain=backend.test; Secure"));
    let response = app(Arc::new(backend))
        .oneshot(Request::builder().uri("/api/v2/auth/status/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let raw = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_owned();
    let cookie = Cookie::parse(raw).unwrap();
    assert_eq!((cookie.domain(), cookie.secure(), cookie.path()), (None, None, Some("/")));
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let response = app(Arc::new(MockBackend::unreachable()))
        .oneshot(Request::builder().uri("/api/v2/auth/status/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
