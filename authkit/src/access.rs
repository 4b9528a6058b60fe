//! Page access decisions shared by the SSR guard and the client guard.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use crate::protection::is_protected;
use crate::redirects::{self, Location, LOGIN_PATH};
use crate::roles::{self, UserRole};
use crate::routes::normalize_path;
use crate::wire::User;

/// Who is looking at the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    SignedIn { role: Option<UserRole> },
}

impl Viewer {
    #[must_use]
    pub fn from_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self::SignedIn { role: user.user_role() },
            None => Self::Anonymous,
        }
    }
}

/// Outcome of checking a navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// Protected page, no user: go to login, remembering where we were.
    Login { to: String },
    /// Signed in without the section's role.
    Unauthorized,
    /// On the login page while signed in: continue to the sanitized `from`.
    AlreadySignedIn { to: String },
}

impl Access {
    /// Target to redirect to, if any.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Login { to } | Self::AlreadySignedIn { to } => Some(to.as_str()),
            Self::Unauthorized => Some(roles::UNAUTHORIZED_PATH),
        }
    }
}

/// Decide whether `viewer` may see `pathname?query`.
#[must_use]
pub fn access_for(pathname: &str, query: &str, viewer: Viewer) -> Access {
    let path = normalize_path(pathname);

    if path == LOGIN_PATH {
        return match viewer {
            Viewer::SignedIn { .. } => Access::AlreadySignedIn { to: redirects::post_login_destination(query) },
            Viewer::Anonymous => Access::Allowed,
        };
    }

    if !is_protected(path) {
        return Access::Allowed;
    }

    match viewer {
        Viewer::Anonymous => {
            let from = redirects::build_return_parameter(&Location::from_parts(path, query, ""));
            Access::Login { to: redirects::login_path_with_return(&from) }
        }
        Viewer::SignedIn { role } => match roles::section_roles(path) {
            Some(allowed) if roles::require_role(role, allowed).is_err() => Access::Unauthorized,
            _ => Access::Allowed,
        },
    }
}
