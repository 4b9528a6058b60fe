use super::*;

#[test]
fn parse_known_roles() {
    assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
    assert_eq!(UserRole::parse(" teacher "), Some(UserRole::Teacher));
    assert_eq!(UserRole::parse("system_admin"), Some(UserRole::SystemAdmin));
    assert_eq!(UserRole::parse("Admin"), None);
    assert_eq!(UserRole::parse(""), None);
}

#[test]
fn as_str_round_trips_through_parse() {
    for role in [UserRole::Admin, UserRole::Teacher, UserRole::Student, UserRole::Parent, UserRole::SystemAdmin] {
        assert_eq!(UserRole::parse(role.as_str()), Some(role));
    }
}

#[test]
fn require_role_accepts_listed_role() {
    assert_eq!(require_role(Some(UserRole::Teacher), &[UserRole::Teacher]), Ok(()));
}

#[test]
fn require_role_rejects_other_or_missing_role() {
    assert_eq!(require_role(Some(UserRole::Student), &[UserRole::Admin]), Err(RoleDenied));
    assert_eq!(require_role(None, &[UserRole::Admin]), Err(RoleDenied));
    assert_eq!(require_role(Some(UserRole::Admin), &[]), Err(RoleDenied));
}

#[test]
fn system_admin_is_not_admin_for_admin_section() {
    let allowed = section_roles("/admin").expect("admin section");
    assert!(require_role(Some(UserRole::SystemAdmin), allowed).is_err());
}

#[test]
fn section_roles_match_section_and_children_only() {
    assert_eq!(section_roles("/admin"), Some(&[UserRole::Admin][..]));
    assert_eq!(section_roles("/admin/users"), Some(&[UserRole::Admin][..]));
    assert_eq!(section_roles("/teacher"), Some(&[UserRole::Teacher][..]));
    assert_eq!(section_roles("/student/schedule"), Some(&[UserRole::Student][..]));
    assert_eq!(section_roles("/administrator"), None);
    assert_eq!(section_roles("/dashboard"), None);
}

#[test]
fn role_denied_message_names_target() {
    assert_eq!(RoleDenied.to_string(), "role not permitted; redirect to /unauthorized");
}
