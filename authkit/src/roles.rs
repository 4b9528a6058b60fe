//! Role checks for the role-scoped sections of the authenticated area.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use serde::{Deserialize, Serialize};

pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Role string assigned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
    Parent,
    SystemAdmin,
}

impl UserRole {
    /// Parse the backend's role string. Unknown roles yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            "parent" => Some(Self::Parent),
            "system_admin" => Some(Self::SystemAdmin),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
            Self::SystemAdmin => "system_admin",
        }
    }
}

/// The current user's role is not in the allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("role not permitted; redirect to /unauthorized")]
pub struct RoleDenied;

/// Succeeds when `role` is one of `allowed`.
///
/// # Errors
///
/// Returns [`RoleDenied`] for a missing or non-matching role.
pub fn require_role(role: Option<UserRole>, allowed: &[UserRole]) -> Result<(), RoleDenied> {
    match role {
        Some(role) if allowed.contains(&role) => Ok(()),
        _ => Err(RoleDenied),
    }
}

const SECTIONS: [(&str, &[UserRole]); 3] = [
    ("/admin", &[UserRole::Admin]),
    ("/teacher", &[UserRole::Teacher]),
    ("/student", &[UserRole::Student]),
];

/// Roles allowed into the section containing `pathname`, if it is role-scoped.
#[must_use]
pub fn section_roles(pathname: &str) -> Option<&'static [UserRole]> {
    SECTIONS.iter().find_map(|(prefix, roles)| {
        let inside = pathname == *prefix || pathname.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'));
        inside.then_some(*roles)
    })
}
