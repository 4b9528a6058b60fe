//! REST API helpers for the backend's V2 auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/failure since these endpoints
//! are only meaningful in the browser; the SSR guard resolves the user
//! itself.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result`/`AuthResult` outputs instead of panics so a
//! backend outage degrades to "signed out" without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use authkit::wire::{self, CSRF_ENDPOINT, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, REGISTER_ENDPOINT, STATUS_ENDPOINT};
use authkit::wire::User;

use super::types::{AuthAction, AuthResult, LoginInput, LogoutResult, RegisterInput};

#[cfg(any(test, feature = "hydrate"))]
const CSRF_HEADER: &str = "X-CSRFToken";

#[cfg(any(test, feature = "hydrate"))]
const CSRF_MISSING: &str = "CSRF token not found in response";

#[cfg(any(test, feature = "hydrate"))]
fn csrf_failed_message(status: u16) -> String {
    format!("Failed to get CSRF token ({status})")
}

#[cfg(any(test, feature = "hydrate"))]
fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(300) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

/// Fetch the currently authenticated user from `/api/v2/auth/status/`.
/// Returns `None` if not authenticated, on any failure, or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(STATUS_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        let content_type = resp.headers().get("content-type").unwrap_or_default();
        if !wire::is_json_content_type(&content_type) {
            return None;
        }
        let body = resp.text().await.ok()?;
        wire::user_from_status(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Fetch a CSRF token from `/api/v2/auth/csrf/`.
///
/// # Errors
///
/// Returns an error string if the request fails or no token is present.
pub async fn fetch_csrf_token() -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CSRF_ENDPOINT).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(csrf_failed_message(resp.status()));
        }
        let body = resp.text().await.map_err(|e| e.to_string())?;
        wire::csrf_token_from(&body).ok_or_else(|| CSRF_MISSING.to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Sign in via `POST /api/v2/auth/login/`.
pub async fn login(input: &LoginInput) -> AuthResult {
    #[cfg(feature = "hydrate")]
    {
        submit(AuthAction::Login, LOGIN_ENDPOINT, input).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        AuthResult::from_transport_error(AuthAction::Login, "not available on server")
    }
}

/// Create an account via `POST /api/v2/auth/register/`.
pub async fn register(input: &RegisterInput) -> AuthResult {
    #[cfg(feature = "hydrate")]
    {
        submit(AuthAction::Register, REGISTER_ENDPOINT, input).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        AuthResult::from_transport_error(AuthAction::Register, "not available on server")
    }
}

/// End the session via `POST /api/v2/auth/logout/`.
pub async fn logout() -> LogoutResult {
    #[cfg(feature = "hydrate")]
    {
        let token = match fetch_csrf_token().await {
            Ok(token) => token,
            Err(e) => return LogoutResult { success: false, error: Some(e) },
        };
        let sent = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .header("Content-Type", "application/json")
            .header(CSRF_HEADER, &token)
            .send()
            .await;
        match sent {
            Ok(resp) => {
                if !resp.ok() {
                    let body = resp.text().await.unwrap_or_default();
                    log::warn!("logout failed: status={} body={}", resp.status(), body_preview(&body));
                }
                LogoutResult { success: resp.ok(), error: None }
            }
            Err(e) => LogoutResult { success: false, error: Some(e.to_string()) },
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        LogoutResult { success: false, error: Some("not available on server".to_owned()) }
    }
}

#[cfg(feature = "hydrate")]
async fn submit<T: serde::Serialize>(action: AuthAction, endpoint: &str, input: &T) -> AuthResult {
    let token = match fetch_csrf_token().await {
        Ok(token) => token,
        Err(e) => return AuthResult::from_transport_error(action, &e),
    };
    let request = gloo_net::http::Request::post(endpoint).header(CSRF_HEADER, &token).json(input);
    let resp = match request {
        Ok(request) => request.send().await,
        Err(e) => return AuthResult::from_transport_error(action, &e.to_string()),
    };
    let resp = match resp {
        Ok(resp) => resp,
        Err(e) => return AuthResult::from_transport_error(action, &e.to_string()),
    };

    let status = resp.status();
    let retry_after = resp.headers().get("retry-after");
    let body_json = resp.headers().get("content-type").is_some_and(|ct| wire::is_json_content_type(&ct));
    let body = resp.text().await.unwrap_or_default();

    if resp.ok() {
        return AuthResult::from_success(&body);
    }
    log::warn!("{endpoint} failed: status={status} body={}", body_preview(&body));
    AuthResult::from_failure(action, status, retry_after.as_deref(), &body, body_json)
}
