//! `/api/*` reverse proxy to the Django backend.
//!
//! The browser only ever talks to this origin, so session and CSRF cookies
//! set by the backend must be rewritten to belong here.

use axum::body::{Body, to_bytes};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::backend::{ProxyRequest, ProxyResponse};
use crate::state::AppState;

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Request headers to send upstream: hop-by-hop headers, `Host` and
/// `Content-Length` are left for the HTTP client to set.
#[must_use]
pub fn upstream_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if is_hop_by_hop(name) || name == header::HOST || name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Response headers to return to the browser, with every `Set-Cookie`
/// rewritten by [`rewrite_set_cookie`].
#[must_use]
pub fn downstream_headers(upstream: &HeaderMap, cookie_secure: bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        if name == header::SET_COOKIE {
            let Ok(raw) = value.to_str() else {
                tracing::warn!("dropping non-ASCII Set-Cookie from backend");
                continue;
            };
            match rewrite_set_cookie(raw, cookie_secure).map(HeaderValue::try_from) {
                Some(Ok(rewritten)) => {
                    out.append(name.clone(), rewritten);
                }
                _ => tracing::warn!("dropping unparseable Set-Cookie from backend"),
            }
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Rebind a backend cookie to this origin: drop `Domain`, force `Path=/`
/// and `SameSite=Lax`, and keep `Secure` only when `cookie_secure` is set.
/// `None` when `raw` is not a cookie.
#[must_use]
pub fn rewrite_set_cookie(raw: &str, cookie_secure: bool) -> Option<String> {
    let mut cookie = Cookie::parse(raw).ok()?;
    let secure = cookie.secure().unwrap_or(false) && cookie_secure;
    cookie.unset_domain();
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure.then_some(true));
    Some(cookie.to_string())
}

/// Forward any `/api/*` request to the backend.
pub async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_owned();
    let path_and_query = parts.uri.path_and_query().map_or_else(|| parts.uri.path().to_owned(), ToString::to_string);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, %path, "proxy request body rejected");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let upstream = ProxyRequest {
        method: parts.method,
        path_and_query,
        headers: upstream_headers(&parts.headers),
        body,
    };

    match state.backend.forward(upstream).await {
        Ok(response) => {
            tracing::debug!(status = %response.status, %path, "proxied");
            into_response(response, state.config.cookie_secure)
        }
        Err(e) => {
            tracing::warn!(error = %e, %path, "backend unavailable");
            (StatusCode::BAD_GATEWAY, "backend unavailable").into_response()
        }
    }
}

fn into_response(upstream: ProxyResponse, cookie_secure: bool) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = downstream_headers(&upstream.headers, cookie_secure);
    response
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
