use super::*;
use authkit::wire::User;

fn signed_in(role: &str) -> AuthState {
    let user: User = serde_json::from_str(&format!(r#"{{"id":"u1","role":"{role}"}}"#)).expect("user");
    AuthState::resolved(Some(user))
}

#[test]
fn no_redirect_while_loading() {
    assert_eq!(guard_redirect(&AuthState::pending(), "/dashboard", ""), None);
}

#[test]
fn anonymous_on_protected_page_goes_to_login() {
    let state = AuthState::resolved(None);
    assert_eq!(guard_redirect(&state, "/teacher", "?week=3").as_deref(), Some("/login?from=%2Fteacher%3Fweek%3D3"));
}

#[test]
fn anonymous_on_public_page_stays() {
    assert_eq!(guard_redirect(&AuthState::resolved(None), "/", ""), None);
}

#[test]
fn wrong_role_goes_to_unauthorized() {
    assert_eq!(guard_redirect(&signed_in("student"), "/admin", "").as_deref(), Some("/unauthorized"));
}

#[test]
fn signed_in_on_login_continues_to_from() {
    assert_eq!(guard_redirect(&signed_in("student"), "/login", "?from=%2Fstudent").as_deref(), Some("/student"));
}

#[test]
fn matching_role_stays() {
    assert_eq!(guard_redirect(&signed_in("admin"), "/admin/users", ""), None);
}
