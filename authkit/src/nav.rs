//! Sidebar navigation table, filtered by the viewer's role.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::roles::UserRole;
use crate::routes::normalize_path;

/// One sidebar entry. `roles` lists who sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub to: &'static str,
    pub label: &'static str,
    pub roles: &'static [UserRole],
}

use UserRole::{Admin, Parent, Student, SystemAdmin, Teacher};

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { to: "/dashboard", label: "Dashboard", roles: &[Admin, Teacher, Student, Parent, SystemAdmin] },
    NavLink { to: "/admin", label: "Administration", roles: &[Admin, SystemAdmin] },
    NavLink { to: "/admin/users", label: "Users", roles: &[Admin, SystemAdmin] },
    NavLink { to: "/teacher", label: "My classes", roles: &[Teacher] },
    NavLink { to: "/teacher/grades", label: "Grades", roles: &[Teacher] },
    NavLink { to: "/student", label: "My courses", roles: &[Student] },
    NavLink { to: "/student/schedule", label: "Schedule", roles: &[Student] },
    NavLink { to: "/parent", label: "My children", roles: &[Parent] },
    NavLink { to: "/parent/payments", label: "Payments", roles: &[Parent] },
    NavLink { to: "/system/logs", label: "System logs", roles: &[SystemAdmin] },
];

/// Links visible to `role`. A user without a recognised role sees none.
#[must_use]
pub fn visible_links(role: Option<UserRole>) -> Vec<&'static NavLink> {
    let Some(role) = role else {
        return Vec::new();
    };
    NAV_LINKS.iter().filter(|link| link.roles.contains(&role)).collect()
}

/// Active when the current path is the link itself or below it.
#[must_use]
pub fn is_link_active(link: &NavLink, pathname: &str) -> bool {
    let path = normalize_path(pathname);
    path == link.to || path.strip_prefix(link.to).is_some_and(|rest| rest.starts_with('/'))
}
