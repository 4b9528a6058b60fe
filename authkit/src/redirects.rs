//! Post-login redirect handling.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/login?from=...` carries a caller-controlled path. Anything read back
//! from it must go through [`safe_redirect_path`] so a crafted link cannot
//! bounce a freshly signed-in user to another origin.

#[cfg(test)]
#[path = "redirects_test.rs"]
mod redirects_test;

use serde_json::Value;
use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/login";
pub const FROM_PARAM: &str = "from";
pub const DEFAULT_LOGIN_DESTINATION: &str = "/dashboard";

const SCRIPT_SCHEMES: [&str; 3] = ["javascript:", "data:", "vbscript:"];

/// Return `candidate` if it is an internal path, `fallback` otherwise.
///
/// The candidate is trimmed before it is checked; the trimmed value is what
/// gets returned. Query string and fragment are kept as-is.
#[must_use]
pub fn safe_redirect_path(candidate: Option<&str>, fallback: &str) -> String {
    let Some(trimmed) = candidate.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback.to_owned();
    };

    if !trimmed.starts_with('/') {
        return fallback.to_owned();
    }
    // URL parsers strip tab and newline, so `/\t/host` becomes `//host`.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return fallback.to_owned();
    }
    // Protocol-relative (`//host`); browsers also read `/\host` that way.
    if trimmed.starts_with("//") || trimmed.starts_with("/\\") {
        return fallback.to_owned();
    }
    let lowered = trimmed.to_ascii_lowercase();
    if trimmed.contains("://") || SCRIPT_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return fallback.to_owned();
    }

    trimmed.to_owned()
}

/// Router location reduced to what a return path needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub pathname: String,
    /// Search parameters in insertion order. `Null` values are dropped when
    /// serialized.
    pub search: Vec<(String, Value)>,
    pub hash: String,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), ..Self::default() }
    }

    /// Build from a raw query string (`a=1&b=2`, leading `?` allowed) and
    /// fragment, as seen by the server or `window.location`.
    #[must_use]
    pub fn from_parts(pathname: &str, query: &str, hash: &str) -> Self {
        let search = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
            .collect();
        Self { pathname: pathname.to_owned(), search, hash: hash.to_owned() }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.search.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }
}

/// Serialize `location` into an internal path suitable for `?from=`.
///
/// Only path, query, and fragment are emitted; never a scheme or host.
#[must_use]
pub fn build_return_parameter(location: &Location) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in &location.search {
        if let Some(text) = coerce(value) {
            query.append_pair(key, &text);
            any = true;
        }
    }

    let mut out = String::new();
    if !location.pathname.starts_with('/') {
        out.push('/');
    }
    out.push_str(&location.pathname);
    if any {
        out.push('?');
        out.push_str(&query.finish());
    }
    if !location.hash.is_empty() {
        if !location.hash.starts_with('#') {
            out.push('#');
        }
        out.push_str(&location.hash);
    }
    out
}

fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| coerce(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// `/login?from=<encoded from>`.
#[must_use]
pub fn login_path_with_return(from: &str) -> String {
    path_with_return(LOGIN_PATH, from)
}

/// `<path>?from=<encoded from>`, for links that hand the return path on
/// (login to register and back).
#[must_use]
pub fn path_with_return(path: &str, from: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(FROM_PARAM, from)
        .finish();
    format!("{path}?{query}")
}

/// First value of `name` in a raw query string (leading `?` allowed).
#[must_use]
pub fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Where a tab sitting on `/login?<query>` should go once a user exists.
#[must_use]
pub fn post_login_destination(query: &str) -> String {
    safe_redirect_path(query_param(query, FROM_PARAM).as_deref(), DEFAULT_LOGIN_DESTINATION)
}
