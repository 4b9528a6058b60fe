//! Route manifest shared by the SSR guard and the client router.
//!
//! DESIGN
//! ======
//! Route ids follow the file-route convention: pathless layouts are named
//! with a leading underscore (`/_authed`, `/_auth`) and every child id is
//! prefixed by its layout's id. Protection is derived from those ids rather
//! than from a separately maintained path list.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const ROOT_ROUTE_ID: &str = "__root__";
pub const AUTHED_LAYOUT_ID: &str = "/_authed";
pub const AUTH_LAYOUT_ID: &str = "/_auth";

/// One entry of the route tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub id: &'static str,
    /// Public URL path; `None` for pathless layouts.
    pub path: Option<&'static str>,
    pub parent: &'static str,
}

const fn page(id: &'static str, path: &'static str, parent: &'static str) -> RouteDef {
    RouteDef { id, path: Some(path), parent }
}

const fn layout(id: &'static str) -> RouteDef {
    RouteDef { id, path: None, parent: ROOT_ROUTE_ID }
}

pub const ROUTES: &[RouteDef] = &[
    page("/", "/", ROOT_ROUTE_ID),
    page("/login", "/login", ROOT_ROUTE_ID),
    page("/logout", "/logout", ROOT_ROUTE_ID),
    page("/unauthorized", "/unauthorized", ROOT_ROUTE_ID),
    layout(AUTH_LAYOUT_ID),
    page("/_auth/register", "/register", AUTH_LAYOUT_ID),
    layout(AUTHED_LAYOUT_ID),
    page("/_authed/dashboard", "/dashboard", AUTHED_LAYOUT_ID),
    page("/_authed/admin", "/admin", AUTHED_LAYOUT_ID),
    page("/_authed/admin/users", "/admin/users", "/_authed/admin"),
    page("/_authed/teacher", "/teacher", AUTHED_LAYOUT_ID),
    page("/_authed/student", "/student", AUTHED_LAYOUT_ID),
];

/// Strip a trailing slash (except for `/`) and anything after `?` or `#`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

/// Route definition whose path equals `path`, if any.
#[must_use]
pub fn find(path: &str) -> Option<&'static RouteDef> {
    let path = normalize_path(path);
    ROUTES.iter().find(|route| route.path == Some(path))
}

fn by_id(id: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|route| route.id == id)
}

/// Ids of every route matched for `path`, from the root down to the leaf.
///
/// Unknown paths match only the root.
#[must_use]
pub fn resolve_matches(path: &str) -> Vec<&'static str> {
    let mut chain = Vec::new();
    let mut cursor = find(path);
    while let Some(route) = cursor {
        chain.push(route.id);
        cursor = by_id(route.parent);
    }
    chain.push(ROOT_ROUTE_ID);
    chain.reverse();
    chain
}
