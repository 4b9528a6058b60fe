//! Backend (V2 auth API) DTOs shared by the browser and the SSR guard.
//!
//! DESIGN
//! ======
//! Only the fields the frontend reads are modeled, and nearly all of them
//! default when missing so a backend adding or dropping optional fields
//! never turns a signed-in user into an anonymous one.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::roles::UserRole;

pub const STATUS_ENDPOINT: &str = "/api/v2/auth/status/";
pub const CSRF_ENDPOINT: &str = "/api/v2/auth/csrf/";
pub const LOGIN_ENDPOINT: &str = "/api/v2/auth/login/";
pub const REGISTER_ENDPOINT: &str = "/api/v2/auth/register/";
pub const LOGOUT_ENDPOINT: &str = "/api/v2/auth/logout/";

/// Standard envelope around every V2 response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// Error block of a failed response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    /// Usually `{field: [messages]}` for validation failures.
    #[serde(default)]
    pub details: Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub level: SecurityLevel,
}

/// The authenticated user as returned by the status/login endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub security: Security,
}

impl User {
    #[must_use]
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(UserRole::parse)
    }

    /// Best human-readable label: full name, then email, then phone.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [Some(self.full_name.as_str()), self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("User")
    }

    /// Up to two uppercase initials for avatar badges.
    #[must_use]
    pub fn initials(&self) -> String {
        let from_names: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if from_names.is_empty() {
            self.display_name().chars().take(1).flat_map(char::to_uppercase).collect()
        } else {
            from_names
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid user id: {other}"))),
    }
}

/// `data` of the status endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusData {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub authenticated: bool,
}

/// `data` of the login and register endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub user: Option<User>,
}

/// `data` of the CSRF endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CsrfData {
    pub csrf_token: String,
}

/// Current user from a status response body; `None` unless `success` is set
/// and a user is present.
#[must_use]
pub fn user_from_status(body: &str) -> Option<User> {
    let envelope: ApiResponse<StatusData> = serde_json::from_str(body).ok()?;
    if !envelope.success {
        return None;
    }
    envelope.data?.user
}

/// CSRF token from a CSRF response body.
#[must_use]
pub fn csrf_token_from(body: &str) -> Option<String> {
    let envelope: ApiResponse<CsrfData> = serde_json::from_str(body).ok()?;
    envelope.data.map(|data| data.csrf_token).filter(|token| !token.is_empty())
}

/// Whether a `Content-Type` header value denotes JSON.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("application/json")
}
