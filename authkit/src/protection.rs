//! Route protection predicates.
//!
//! Two variants share one public-path exclusion list:
//! - prefix: the path starts with a configured protected prefix. Unknown
//!   paths are not protected.
//! - metadata: a matched route id belongs to the `/_authed` layout. This is
//!   derived from the same route tree the router renders.
//!
//! [`is_protected`] is the seam callers use; it applies both, so a path is
//! protected if either variant says so.

#[cfg(test)]
#[path = "protection_test.rs"]
mod protection_test;

use crate::routes::{self, AUTHED_LAYOUT_ID};

pub const PUBLIC_PATHS: [&str; 4] = ["/", "/login", "/logout", "/unauthorized"];
pub const PUBLIC_PREFIX: &str = "/demo/";
pub const DEFAULT_PROTECTED_PREFIXES: [&str; 4] = ["/dashboard", "/admin", "/teacher", "/student"];

/// Paths that never require a user.
#[must_use]
pub fn is_public_path(pathname: &str) -> bool {
    PUBLIC_PATHS.contains(&pathname) || pathname.starts_with(PUBLIC_PREFIX)
}

/// Prefix-list classifier with a configurable prefix set.
#[derive(Clone, Debug)]
pub struct RouteProtection {
    prefixes: Vec<String>,
}

impl Default for RouteProtection {
    fn default() -> Self {
        Self::with_prefixes(DEFAULT_PROTECTED_PREFIXES)
    }
}

impl RouteProtection {
    #[must_use]
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { prefixes: prefixes.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn is_protected_path(&self, pathname: &str) -> bool {
        if is_public_path(pathname) {
            return false;
        }
        self.prefixes.iter().any(|prefix| pathname.starts_with(prefix.as_str()))
    }
}

/// Prefix variant with the default prefix set.
#[must_use]
pub fn is_protected_path(pathname: &str) -> bool {
    RouteProtection::default().is_protected_path(pathname)
}

/// Metadata variant: protected when any matched route id is under `/_authed`.
#[must_use]
pub fn is_route_protected<S: AsRef<str>>(pathname: &str, matches: &[S]) -> bool {
    if is_public_path(pathname) {
        return false;
    }
    matches.iter().any(|id| id.as_ref().contains(AUTHED_LAYOUT_ID))
}

/// Whether `pathname` requires an authenticated user.
#[must_use]
pub fn is_protected(pathname: &str) -> bool {
    let pathname = routes::normalize_path(pathname);
    is_route_protected(pathname, &routes::resolve_matches(pathname)) || is_protected_path(pathname)
}
