use super::*;
use crate::config::BackendTimeouts;

fn config(backend_url: &str) -> ServerConfig {
    ServerConfig {
        port: 3000,
        backend_url: backend_url.into(),
        cookie_secure: false,
        timeouts: BackendTimeouts { request_secs: 1, connect_secs: 1 },
    }
}

#[test]
fn url_joins_base_and_path() {
    let backend = HttpBackend::new(&config("http://backend:8000")).unwrap();
    assert_eq!(backend.url("/api/v2/auth/status/"), "http://backend:8000/api/v2/auth/status/");
    assert_eq!(backend.url("/api/x/?a=1"), "http://backend:8000/api/x/?a=1");
}

#[tokio::test]
async fn unreachable_backend_is_a_request_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let backend = HttpBackend::new(&config("http://127.0.0.1:9")).unwrap();
    let err = backend.current_user(None).await.unwrap_err();
    assert!(matches!(err, BackendError::Request(_)), "{err}");
}

#[test]
fn error_messages_name_the_failure() {
    assert_eq!(BackendError::Request("timeout".into()).to_string(), "backend request failed: timeout");
    assert_eq!(BackendError::HttpClientBuild("tls".into()).to_string(), "HTTP client build failed: tls");
}
