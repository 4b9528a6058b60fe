use super::*;

#[test]
fn link_class_marks_active_section() {
    let users = nav::NAV_LINKS.iter().find(|link| link.to == "/admin/users").expect("users link");
    assert_eq!(link_class(users, "/admin/users"), "sidebar__link sidebar__link--active");
    assert_eq!(link_class(users, "/admin"), "sidebar__link");
}
