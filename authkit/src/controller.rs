//! What the root route should do when auth state may have changed.
//!
//! ARCHITECTURE
//! ============
//! These functions only decide. The UI adapter owns the router and applies
//! a [`Reaction`]: re-fetch the current user when `invalidate` is set, then
//! perform `navigate` if present.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::event::AuthEventType;
use crate::protection::is_protected;
use crate::redirects::{self, Location, LOGIN_PATH};
use crate::routes::normalize_path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Attach `?from=<current page>` when a logout pushes a tab to login.
    pub preserve_return_path: bool,
}

/// Where the tab currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentLocation<'a> {
    pub pathname: &'a str,
    /// Raw query string, with or without the leading `?`.
    pub query: &'a str,
    pub hash: &'a str,
}

impl<'a> CurrentLocation<'a> {
    #[must_use]
    pub fn new(pathname: &'a str, query: &'a str) -> Self {
        Self { pathname, query, hash: "" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
    pub replace: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub invalidate: bool,
    pub navigate: Option<Navigation>,
}

impl Reaction {
    fn invalidate_only() -> Self {
        Self { invalidate: true, navigate: None }
    }

    fn invalidate_then(to: String) -> Self {
        Self { invalidate: true, navigate: Some(Navigation { to, replace: true }) }
    }
}

/// Reaction to a login/logout event seen by this tab.
#[must_use]
pub fn react_to_auth_event(kind: AuthEventType, location: CurrentLocation<'_>, options: ControllerOptions) -> Reaction {
    let path = normalize_path(location.pathname);
    match kind {
        AuthEventType::Logout => {
            if !is_protected(path) {
                return Reaction::invalidate_only();
            }
            let to = if options.preserve_return_path {
                let here = Location::from_parts(path, location.query, location.hash);
                redirects::login_path_with_return(&redirects::build_return_parameter(&here))
            } else {
                LOGIN_PATH.to_owned()
            };
            Reaction::invalidate_then(to)
        }
        AuthEventType::Login => {
            if path != LOGIN_PATH {
                return Reaction::invalidate_only();
            }
            Reaction::invalidate_then(redirects::post_login_destination(location.query))
        }
    }
}

/// Reaction to `visibilitychange`: refresh only when the tab became visible.
#[must_use]
pub fn react_to_visibility(visible: bool) -> Reaction {
    Reaction { invalidate: visible, navigate: None }
}

/// Reaction to the window regaining focus.
#[must_use]
pub fn react_to_focus() -> Reaction {
    Reaction::invalidate_only()
}
