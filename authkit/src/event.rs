//! Auth event model carried between tabs.
//!
//! DESIGN
//! ======
//! `source` and `seq` are optional on the wire so payloads written by an
//! older build still decode. When present they let receivers drop echoes of
//! their own events and replays of events they already delivered.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};

/// Kind of auth transition a tab performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthEventType {
    Login,
    Logout,
}

impl AuthEventType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

/// A single login/logout notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    #[serde(rename = "type")]
    pub kind: AuthEventType,
    /// Milliseconds since the Unix epoch when the event was emitted.
    pub timestamp: i64,
    /// Identifier of the emitting bus (one per tab).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    /// Per-source monotonic counter, starting at 1. Zero means "unknown".
    #[serde(default, skip_serializing_if = "is_zero")]
    pub seq: u64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl AuthEvent {
    #[must_use]
    pub fn new(kind: AuthEventType, timestamp: i64) -> Self {
        Self { kind, timestamp, source: String::new(), seq: 0 }
    }

    /// JSON text used by the storage and broadcast transports.
    #[must_use]
    pub fn encode(&self) -> String {
        // Serializing a plain struct of strings and integers cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a payload received from another tab.
    ///
    /// Malformed input yields `None`; callers drop it without surfacing an error.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
