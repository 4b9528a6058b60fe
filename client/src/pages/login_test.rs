use super::*;
use crate::net::types::{AuthAction, AuthResult};

fn failure(status: u16, body: &str) -> AuthResult {
    AuthResult::from_failure(AuthAction::Login, status, None, body, true)
}

#[test]
fn locked_account_disables_form_with_support_message() {
    let result = failure(403, r#"{"success":false,"message":"Account locked","error":{"code":"ACCOUNT_LOCKED","details":null}}"#);
    let feedback = login_feedback(&result);
    assert!(feedback.locked);
    assert_eq!(feedback.cooldown_secs, None);
    assert!(feedback.message.starts_with("Account temporarily locked"));
}

#[test]
fn rate_limit_starts_cooldown() {
    let result = AuthResult::from_failure(AuthAction::Login, 429, Some("30"), "", false);
    let feedback = login_feedback(&result);
    assert_eq!(feedback.cooldown_secs, Some(30));
    assert_eq!(feedback.message, "Too many attempts. Try again in 30 seconds.");
}

#[test]
fn field_errors_are_joined_per_field() {
    let result = failure(400, r#"{"success":false,"message":"Invalid input","error":{"code":"VALIDATION_ERROR","details":{"identifier":["Required","Too short"]}}}"#);
    let feedback = login_feedback(&result);
    assert_eq!(feedback.message, "Please fix the highlighted fields.");
    assert_eq!(feedback.field_errors["identifier"], "Required, Too short");
}

#[test]
fn invalid_credentials_mark_both_fields() {
    let result = failure(401, r#"{"success":false,"message":"Nope","error":{"code":"INVALID_CREDENTIALS","details":null}}"#);
    let feedback = login_feedback(&result);
    assert_eq!(feedback.message, "Incorrect identifier or password.");
    assert!(feedback.field_errors.contains_key("identifier"));
    assert!(feedback.field_errors.contains_key("password"));
}

#[test]
fn other_errors_pass_message_through() {
    let feedback = login_feedback(&AuthResult::from_transport_error(AuthAction::Login, "Failed to get CSRF token (503)"));
    assert_eq!(feedback.message, "Failed to get CSRF token (503)");
    assert_eq!(login_feedback(&AuthResult::default()).message, "Login failed. Please try again.");
}

#[test]
fn blur_validation_messages() {
    assert_eq!(validate_identifier("   "), Some("Please enter your email, phone, or username"));
    assert_eq!(validate_identifier("awa"), None);
    assert_eq!(validate_password(""), Some("Please enter your password"));
    assert_eq!(validate_password(" "), None);
}
