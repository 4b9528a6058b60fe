//! SSR access guard for page requests.
//!
//! Runs before Leptos renders a page so a protected page never reaches an
//! anonymous browser, even with JavaScript disabled. The client repeats the
//! same decision after hydration.

use authkit::access::{Viewer, access_for};
use authkit::protection::is_protected;
use authkit::redirects::{DEFAULT_LOGIN_DESTINATION, LOGIN_PATH};
use authkit::routes::normalize_path;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::http::header::{COOKIE, LOCATION};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Whether deciding access for `path` needs the current user.
#[must_use]
pub fn needs_user(path: &str) -> bool {
    let path = normalize_path(path);
    path == LOGIN_PATH || is_protected(path)
}

/// `302 Found` to `target`, or to the default destination when `target`
/// is not a valid header value.
#[must_use]
pub fn found(target: &str) -> Response {
    let location = HeaderValue::try_from(target).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "redirect target is not a header value");
        HeaderValue::from_static(DEFAULT_LOGIN_DESTINATION)
    });
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

pub async fn ssr_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !needs_user(&path) {
        return next.run(request).await;
    }

    let query = request.uri().query().unwrap_or_default().to_owned();
    let cookie = request.headers().get(COOKIE).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let user = match state.backend.current_user(cookie.as_deref()).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, %path, "user lookup failed; treating as anonymous");
            None
        }
    };

    let access = access_for(&path, &query, Viewer::from_user(user.as_ref()));
    if let Some(target) = access.redirect_target() {
        tracing::debug!(%path, to = target, "guard redirect");
        return found(target);
    }
    next.run(request).await
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
