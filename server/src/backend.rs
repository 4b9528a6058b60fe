//! HTTP client for the Django backend.
//!
//! DESIGN
//! ======
//! Handlers depend on the [`BackendApi`] trait rather than on `reqwest`
//! directly so the proxy and the SSR guard can be tested with an in-memory
//! backend.

use std::time::Duration;

use authkit::wire::{self, User};
use axum::body::Bytes;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, Method, StatusCode};
use thiserror::Error;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect error, timeout).
    #[error("backend request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("backend response body failed: {0}")]
    Body(String),
}

/// A request to forward verbatim to the backend.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Path plus optional `?query`, starting with `/`.
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// What the backend answered.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    /// Resolve the signed-in user for the given `Cookie` header.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend cannot be reached.
    async fn current_user(&self, cookie: Option<&str>) -> Result<Option<User>, BackendError>;

    /// Forward a request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the backend cannot be reached or the
    /// body cannot be read.
    async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, BackendError>;
}

/// [`BackendApi`] over HTTP.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the client cannot be built.
    pub fn new(config: &ServerConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.backend_url.clone() })
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base_url)
    }
}

#[async_trait::async_trait]
impl BackendApi for HttpBackend {
    async fn current_user(&self, cookie: Option<&str>) -> Result<Option<User>, BackendError> {
        let mut request = self.http.get(self.url(wire::STATUS_ENDPOINT));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request.send().await.map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(wire::is_json_content_type);
        if !status.is_success() || !is_json {
            tracing::debug!(%status, is_json, "status endpoint returned no user");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| BackendError::Body(e.to_string()))?;
        Ok(wire::user_from_status(&body))
    }

    async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, BackendError> {
        let response = self
            .http
            .request(request.method, self.url(&request.path_and_query))
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| BackendError::Body(e.to_string()))?;
        Ok(ProxyResponse { status, headers, body })
    }
}

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;
