use super::*;

fn targets(role: Option<UserRole>) -> Vec<&'static str> {
    visible_links(role).into_iter().map(|link| link.to).collect()
}

#[test]
fn teacher_sees_dashboard_and_teacher_section() {
    assert_eq!(targets(Some(UserRole::Teacher)), ["/dashboard", "/teacher", "/teacher/grades"]);
}

#[test]
fn system_admin_sees_admin_and_logs() {
    assert_eq!(targets(Some(UserRole::SystemAdmin)), ["/dashboard", "/admin", "/admin/users", "/system/logs"]);
}

#[test]
fn parent_sees_parent_section() {
    assert_eq!(targets(Some(UserRole::Parent)), ["/dashboard", "/parent", "/parent/payments"]);
}

#[test]
fn unknown_role_sees_nothing() {
    assert!(visible_links(None).is_empty());
}

#[test]
fn active_matches_exact_and_nested_paths() {
    let admin = &NAV_LINKS[1];
    assert!(is_link_active(admin, "/admin"));
    assert!(is_link_active(admin, "/admin/"));
    assert!(is_link_active(admin, "/admin/users"));
    assert!(!is_link_active(admin, "/administrator"));
    assert!(!is_link_active(admin, "/dashboard"));
}
