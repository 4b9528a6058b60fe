//! Request and result types for the auth form submissions.
//!
//! DESIGN
//! ======
//! Response classification is pure (`AuthResult::from_failure`) so the
//! status-code rules can be tested without a browser; `api` only moves bytes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use authkit::wire::{ApiResponse, User, UserData};
use serde::Serialize;
use serde_json::Value;

/// Seconds to wait after a 429 that carried no usable `Retry-After`.
pub const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Body of `POST /api/v2/auth/login/`. `identifier` is an email or phone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoginInput {
    pub identifier: String,
    pub password: String,
    pub remember_me: bool,
}

/// Body of `POST /api/v2/auth/register/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterInput {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub terms_accepted: bool,
    pub marketing_opt_in: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Registration",
        }
    }

    fn network_error(self) -> &'static str {
        match self {
            Self::Login => "Network error during login",
            Self::Register => "Network error during registration",
        }
    }
}

/// Per-field server messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Outcome of a login or registration attempt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthResult {
    pub success: bool,
    pub user: Option<User>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub field_errors: FieldErrors,
    /// Seconds until another attempt is allowed (rate limited).
    pub retry_after: Option<u32>,
}

impl AuthResult {
    /// Successful response; the user is read from `data.user` when present.
    #[must_use]
    pub fn from_success(body: &str) -> Self {
        let user = serde_json::from_str::<ApiResponse<UserData>>(body).ok().and_then(|env| env.data).and_then(|d| d.user);
        Self { success: true, user, ..Self::default() }
    }

    /// Request never produced a response (or CSRF bootstrap failed).
    #[must_use]
    pub fn from_transport_error(action: AuthAction, message: &str) -> Self {
        let error = if message.trim().is_empty() { action.network_error().to_owned() } else { message.to_owned() };
        Self { error: Some(error), ..Self::default() }
    }

    /// Non-2xx response. `body_json` is true when the response declared a
    /// JSON content type.
    #[must_use]
    pub fn from_failure(action: AuthAction, status: u16, retry_after: Option<&str>, body: &str, body_json: bool) -> Self {
        let envelope = if body_json { serde_json::from_str::<ApiResponse<Value>>(body).ok() } else { None };

        let message = envelope.as_ref().map(|env| env.message.trim()).filter(|m| !m.is_empty());
        let text = if envelope.is_none() { Some(body.trim()).filter(|t| !t.is_empty()) } else { None };
        let error = message.or(text).map_or_else(|| format!("{} failed ({status})", action.label()), str::to_owned);

        let api_error = envelope.as_ref().and_then(|env| env.error.as_ref());
        let error_code = api_error.map(|e| e.code.clone()).filter(|code| !code.is_empty());

        let mut result = Self { error: Some(error), error_code, ..Self::default() };
        match status {
            429 => {
                let secs = retry_after.and_then(|raw| raw.trim().parse::<u32>().ok());
                result.retry_after = Some(secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS));
            }
            400 => {
                if let Some(details) = api_error.map(|e| &e.details) {
                    result.field_errors = field_errors_from(details);
                }
            }
            409 if action == AuthAction::Register => {
                let message = message.unwrap_or("An account with this email already exists");
                result.field_errors.insert("email".to_owned(), vec![message.to_owned()]);
            }
            _ => {}
        }
        result
    }

    /// First server message for `field`, if any.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).and_then(|msgs| msgs.first()).map(String::as_str)
    }
}

/// `{field: [msg, ...]}` or `{field: "msg"}` into [`FieldErrors`].
#[must_use]
pub fn field_errors_from(details: &Value) -> FieldErrors {
    let Some(fields) = details.as_object() else {
        return FieldErrors::new();
    };
    fields
        .iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = match value {
                Value::Array(items) => items.iter().map(message_text).collect(),
                Value::Null => Vec::new(),
                other => vec![message_text(other)],
            };
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect()
}

fn message_text(value: &Value) -> String {
    value.as_str().map_or_else(|| value.to_string(), str::to_owned)
}

/// Outcome of `logout()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogoutResult {
    pub success: bool,
    pub error: Option<String>,
}
